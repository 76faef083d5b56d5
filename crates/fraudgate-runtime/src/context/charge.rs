//! Charge model and its attribute flattening

use super::attributes::AttributeMap;
use fraudgate_core::{Console, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A payment charge submitted for a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub payer: Payer,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    /// Identity-module signals (`identity.email_age_days`, ...)
    #[serde(default)]
    pub identity: HashMap<String, Value>,
    /// Pre-computed velocity aggregates (`aggregation.payer.charge.h1.sum`, ...)
    #[serde(default)]
    pub aggregation: HashMap<String, Value>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Caller-supplied console; the engine default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<Console>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub method_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Collects present optional fields into an object
#[derive(Default)]
struct ObjectBuilder(HashMap<String, Value>);

impl ObjectBuilder {
    fn opt(mut self, key: &str, value: &Option<String>) -> Self {
        if let Some(v) = value {
            self.0.insert(key.to_string(), Value::String(v.clone()));
        }
        self
    }

    fn build(self) -> Value {
        Value::Object(self.0)
    }
}

impl Charge {
    /// Flatten the charge into the attribute map rules are evaluated against
    ///
    /// Absent optional fields are left out so a rule referencing them
    /// reports a missing operand instead of comparing against a placeholder.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();

        if !self.id.is_empty() {
            attrs.insert("id", self.id.as_str());
        }
        attrs.insert("company_id", self.company_id.as_str());
        attrs.insert("amount", self.amount);
        if let Some(currency) = &self.currency {
            attrs.insert("currency", currency.as_str());
        }
        if let Some(installments) = self.monthly_installments {
            attrs.insert("monthly_installments", installments);
        }
        if let Some(description) = &self.description {
            attrs.insert("description", description.as_str());
        }

        attrs.insert(
            "payer",
            ObjectBuilder::default()
                .opt("email", &self.payer.email)
                .opt("phone", &self.payer.phone)
                .opt("name", &self.payer.name)
                .opt("document", &self.payer.document)
                .build(),
        );

        let pm = &self.payment_method;
        attrs.insert(
            "payment_method",
            ObjectBuilder::default()
                .opt("type", &pm.method_type)
                .opt("card_hash", &pm.card_hash)
                .opt("bin", &pm.bin)
                .opt("last4", &pm.last4)
                .opt("brand", &pm.brand)
                .opt("country", &pm.country)
                .opt("issuer", &pm.issuer)
                .build(),
        );

        if let Some(device) = &self.device {
            attrs.insert(
                "device",
                ObjectBuilder::default()
                    .opt("fingerprint", &device.fingerprint)
                    .opt("ip_address", &device.ip_address)
                    .opt("user_agent", &device.user_agent)
                    .build(),
            );
        }

        attrs.insert("identity", Value::Object(self.identity.clone()));
        attrs.insert("aggregation", Value::Object(self.aggregation.clone()));
        attrs.insert("metadata", Value::Object(self.metadata.clone()));

        attrs
    }
}
