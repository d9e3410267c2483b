//! Builds the payload for creating or updating a hosted payment session.

pub mod transformers;

use std::collections::HashMap;

use error_stack::ResultExt;

use crate::configs::GatewayConfig;
use crate::consts;
use crate::errors::{CustomResult, SessionError};
use crate::interfaces::{CustomerProvisioner, OrderIdSequence, RouteUrlBuilder};
use crate::multishipping::MultishippingReservation;
use crate::types::{
    AmountConvertor, CheckoutQuote, CustomerContext, StringMajorUnit, StringMajorUnitForGateway,
};
use transformers::{
    encode_custom_data, force_https, AcquiredCustomer, AcquiredPayment, AcquiredSessionRequest,
    AcquiredTds, AcquiredTransaction,
};

/// Assembles [`AcquiredSessionRequest`] payloads from the request-scoped
/// checkout context. One payload is built per checkout attempt and handed
/// straight to the outbound call; nothing is persisted here.
pub struct PaymentSessionBuilder<'a> {
    config: &'a GatewayConfig,
    url_builder: &'a dyn RouteUrlBuilder,
    customer_provisioner: &'a dyn CustomerProvisioner,
    order_sequence: &'a dyn OrderIdSequence,
    amount_converter: &'static (dyn AmountConvertor<Output = StringMajorUnit> + Sync),
}

impl<'a> PaymentSessionBuilder<'a> {
    pub fn new(
        config: &'a GatewayConfig,
        url_builder: &'a dyn RouteUrlBuilder,
        customer_provisioner: &'a dyn CustomerProvisioner,
        order_sequence: &'a dyn OrderIdSequence,
    ) -> Self {
        Self {
            config,
            url_builder,
            customer_provisioner,
            order_sequence,
            amount_converter: &StringMajorUnitForGateway,
        }
    }

    /// Builds the session payload for `order_id`. Any collaborator or
    /// serialization failure is logged and surfaced as a single
    /// [`SessionError`]; no partial payload is returned.
    pub fn execute(
        &self,
        order_id: &str,
        quote: &CheckoutQuote,
        customer: Option<&CustomerContext>,
        custom_data: Option<&HashMap<String, String>>,
    ) -> CustomResult<AcquiredSessionRequest, SessionError> {
        self.build(order_id, quote, customer, custom_data).map_err(|error| {
            tracing::error!(?error, "Get Payment Session data failed");
            error
        })
    }

    fn build(
        &self,
        order_id: &str,
        quote: &CheckoutQuote,
        customer: Option<&CustomerContext>,
        custom_data: Option<&HashMap<String, String>>,
    ) -> CustomResult<AcquiredSessionRequest, SessionError> {
        let mut transaction = AcquiredTransaction {
            order_id: order_id.to_string(),
            amount: self.amount_converter.convert(quote.grand_total),
            currency: quote.currency_code.to_lowercase(),
            capture: self.config.capture,
            custom1: None,
            custom2: None,
            custom_data: None,
        };

        // Multishipping checkouts authorize only; capture waits until each
        // sub-order is confirmed.
        if quote.is_multishipping {
            let reservation = MultishippingReservation::reserve(self.order_sequence, quote)
                .change_context(SessionError::BuildFailed)?;
            reservation.apply(&mut transaction);
        }

        if let Some(data) = custom_data.filter(|data| !data.is_empty()) {
            transaction.custom_data = Some(encode_custom_data(data)?);
        }

        let tds = AcquiredTds {
            is_active: self.config.tds.is_active,
            challenge_preference: self.config.tds.challenge_preference,
            contact_url: force_https(&self.config.tds.contact_url),
            redirect_url: force_https(&self.url_builder.get_url(consts::THREEDSECURE_RESPONSE_ROUTE)),
            webhook_url: force_https(&self.url_builder.get_url(consts::WEBHOOK_ROUTE)),
        };

        let (customer_block, payment_block) = match customer {
            Some(context) => {
                let gateway_customer = self
                    .customer_provisioner
                    .execute()
                    .change_context(SessionError::BuildFailed)?;
                let payment = self.config.create_card_enabled.then(|| AcquiredPayment {
                    create_card: true,
                    reference: context.customer_id.clone(),
                });
                (Some(AcquiredCustomer { customer_id: gateway_customer.customer_id }), payment)
            }
            None => (None, None),
        };

        Ok(AcquiredSessionRequest {
            transaction,
            tds,
            customer: customer_block,
            payment: payment_block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{ChallengePreference, TdsConfig};
    use crate::errors::HostError;
    use crate::types::{FloatMajorUnit, GatewayCustomer};

    struct TestUrls;

    impl RouteUrlBuilder for TestUrls {
        fn get_url(&self, route: &str) -> String {
            format!("http://store.example/{route}")
        }
    }

    struct StaticProvisioner;

    impl CustomerProvisioner for StaticProvisioner {
        fn execute(&self) -> CustomResult<GatewayCustomer, HostError> {
            Ok(GatewayCustomer { customer_id: "cus_abc123".to_string() })
        }
    }

    struct FailingProvisioner;

    impl CustomerProvisioner for FailingProvisioner {
        fn execute(&self) -> CustomResult<GatewayCustomer, HostError> {
            Err(error_stack::report!(HostError::CustomerProvisioningFailed))
        }
    }

    struct StaticSequence(Vec<&'static str>);

    impl OrderIdSequence for StaticSequence {
        fn reserve_order_ids(&self, _quote: &CheckoutQuote) -> CustomResult<Vec<String>, HostError> {
            Ok(self.0.iter().map(ToString::to_string).collect())
        }
    }

    fn config(capture: bool, create_card_enabled: bool) -> GatewayConfig {
        GatewayConfig {
            capture,
            create_card_enabled,
            tds: TdsConfig {
                is_active: true,
                challenge_preference: ChallengePreference::ChallengePreferred,
                contact_url: "http://store.example/contact".to_string(),
            },
        }
    }

    fn quote(is_multishipping: bool) -> CheckoutQuote {
        CheckoutQuote {
            grand_total: FloatMajorUnit::new(1234.5),
            currency_code: "GBP".to_string(),
            is_multishipping,
        }
    }

    #[test]
    fn builds_guest_payload_with_formatted_amount_and_lowercase_currency() {
        let config = config(true, false);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);

        let request = builder.execute("100000001", &quote(false), None, None).unwrap();

        assert_eq!(request.transaction.order_id, "100000001");
        assert_eq!(request.transaction.amount.get_amount_as_string(), "1234.50");
        assert_eq!(request.transaction.currency, "gbp");
        assert!(request.transaction.capture);
        assert!(request.customer.is_none());
        assert!(request.payment.is_none());
    }

    #[test]
    fn rewrites_all_tds_urls_to_https() {
        let config = config(true, false);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);

        let request = builder.execute("100000001", &quote(false), None, None).unwrap();

        assert_eq!(request.tds.contact_url, "https://store.example/contact");
        assert_eq!(
            request.tds.redirect_url,
            "https://store.example/acquired/threedsecure/response"
        );
        assert_eq!(request.tds.webhook_url, "https://store.example/acquired/webhook");
        assert!(request.tds.is_active);
        assert_eq!(request.tds.challenge_preference, ChallengePreference::ChallengePreferred);
    }

    #[test]
    fn multishipping_overrides_capture_and_order_id() {
        let config = config(true, false);
        let sequence = StaticSequence(vec!["2000000011", "2000000012", "2000000013"]);
        let builder = PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);

        let request = builder.execute("100000001", &quote(true), None, None).unwrap();

        assert!(!request.transaction.capture);
        assert_eq!(request.transaction.order_id, "2000000011-ACQM");
        assert_eq!(request.transaction.custom1.as_deref(), Some("multishipping order"));
        assert_eq!(
            request.transaction.custom2.as_deref(),
            Some("2000000011,2000000012,2000000013")
        );
    }

    #[test]
    fn logged_in_customer_gets_customer_and_card_on_file_blocks() {
        let config = config(false, true);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);
        let customer = CustomerContext { customer_id: "42".to_string() };

        let request = builder.execute("100000001", &quote(false), Some(&customer), None).unwrap();

        assert_eq!(request.customer.unwrap().customer_id, "cus_abc123");
        let payment = request.payment.unwrap();
        assert!(payment.create_card);
        assert_eq!(payment.reference, "42");
    }

    #[test]
    fn card_on_file_block_is_absent_when_disabled() {
        let config = config(false, false);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);
        let customer = CustomerContext { customer_id: "42".to_string() };

        let request = builder.execute("100000001", &quote(false), Some(&customer), None).unwrap();

        assert!(request.customer.is_some());
        assert!(request.payment.is_none());
    }

    #[test]
    fn custom_data_is_base64_encoded_into_the_transaction() {
        let config = config(true, false);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);
        let mut data = HashMap::new();
        data.insert("origin".to_string(), "checkout".to_string());

        let request = builder.execute("100000001", &quote(false), None, Some(&data)).unwrap();

        let encoded = request.transaction.custom_data.unwrap();
        let decoded =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, encoded).unwrap();
        let parsed: HashMap<String, String> = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn empty_custom_data_is_dropped() {
        let config = config(true, false);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &StaticProvisioner, &sequence);

        let request =
            builder.execute("100000001", &quote(false), None, Some(&HashMap::new())).unwrap();

        assert!(request.transaction.custom_data.is_none());
    }

    #[test]
    fn provisioning_failure_surfaces_as_session_error() {
        let config = config(true, true);
        let sequence = StaticSequence(vec![]);
        let builder =
            PaymentSessionBuilder::new(&config, &TestUrls, &FailingProvisioner, &sequence);
        let customer = CustomerContext { customer_id: "42".to_string() };

        let error = builder
            .execute("100000001", &quote(false), Some(&customer), None)
            .unwrap_err();
        assert_eq!(error.current_context(), &SessionError::BuildFailed);
    }
}
