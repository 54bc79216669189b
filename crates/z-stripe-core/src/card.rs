//! Card parameters for operations that attach a payment source.

use crate::form::FormBody;

/// A card, given either as a token or as raw details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardParams {
    /// Card token. When present, raw card details are not sent.
    pub token: Option<String>,
    /// Card number.
    pub number: String,
    /// Expiry month.
    pub exp_month: String,
    /// Expiry year.
    pub exp_year: String,
    /// Security code.
    pub cvc: Option<String>,
    /// Cardholder name.
    pub name: Option<String>,
    /// Billing address line 1.
    pub address_line1: Option<String>,
    /// Billing address line 2.
    pub address_line2: Option<String>,
    /// Billing city.
    pub address_city: Option<String>,
    /// Billing state or region.
    pub address_state: Option<String>,
    /// Billing postal code.
    pub address_zip: Option<String>,
    /// Billing country.
    pub address_country: Option<String>,
}

impl CardParams {
    /// Card given by token.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Card given by number and expiry.
    #[must_use]
    pub fn from_details(
        number: impl Into<String>,
        exp_month: impl Into<String>,
        exp_year: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            exp_month: exp_month.into(),
            exp_year: exp_year.into(),
            ..Self::default()
        }
    }

    /// Append the card under the `card` key.
    ///
    /// When `creating`, the card source itself is sent: a token is sent alone
    /// as `card=<token>`, otherwise `card[object]`, number, expiry and
    /// optional cvc. Name and address fields follow raw details, and are the
    /// only fields sent when not creating.
    pub fn encode_details(&self, body: &mut FormBody, creating: bool) {
        if creating {
            if let Some(token) = &self.token {
                body.add("card", token.clone());
                return;
            }
            body.add("card[object]", "card");
            body.add("card[number]", self.number.clone());
            body.add("card[exp_month]", self.exp_month.clone());
            body.add("card[exp_year]", self.exp_year.clone());
            body.add_opt("card[cvc]", self.cvc.as_ref());
        }

        body.add_opt("card[name]", self.name.as_ref());
        body.add_opt("card[address_line1]", self.address_line1.as_ref());
        body.add_opt("card[address_line2]", self.address_line2.as_ref());
        body.add_opt("card[address_city]", self.address_city.as_ref());
        body.add_opt("card[address_state]", self.address_state.as_ref());
        body.add_opt("card[address_zip]", self.address_zip.as_ref());
        body.add_opt("card[address_country]", self.address_country.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_replaces_raw_details() {
        let mut body = FormBody::new();
        CardParams::from_token("tok_visa").encode_details(&mut body, true);

        assert_eq!(body.pairs(), [("card".to_string(), "tok_visa".to_string())]);
    }

    #[test]
    fn token_suppresses_holder_fields() {
        let mut card = CardParams::from_token("tok_visa");
        card.name = Some("Ada".into());
        card.address_zip = Some("94107".into());

        let mut body = FormBody::new();
        card.encode_details(&mut body, true);

        assert_eq!(body.pairs(), [("card".to_string(), "tok_visa".to_string())]);
    }

    #[test]
    fn raw_details_when_creating() {
        let mut card = CardParams::from_details("4242424242424242", "12", "2030");
        card.cvc = Some("123".into());
        card.name = Some("Ada".into());

        let mut body = FormBody::new();
        card.encode_details(&mut body, true);

        assert_eq!(body.get("card[object]"), Some("card"));
        assert_eq!(body.get("card[number]"), Some("4242424242424242"));
        assert_eq!(body.get("card[exp_month]"), Some("12"));
        assert_eq!(body.get("card[exp_year]"), Some("2030"));
        assert_eq!(body.get("card[cvc]"), Some("123"));
        assert_eq!(body.get("card[name]"), Some("Ada"));
        assert!(!body.contains_key("card[address_zip]"));
    }

    #[test]
    fn only_holder_fields_when_not_creating() {
        let mut card = CardParams::from_details("4242424242424242", "12", "2030");
        card.address_zip = Some("94107".into());

        let mut body = FormBody::new();
        card.encode_details(&mut body, false);

        assert_eq!(body.keys().collect::<Vec<_>>(), ["card[address_zip]"]);
    }
}
