use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for personal data (phone numbers, emails) that must not leak into logs.
///
/// `Debug` and `Display` show only the last four characters. Serialization
/// writes the real value, since API payloads and provider calls need it.
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn redacted(&self) -> String {
        let raw = self.0.as_ref();
        let visible: String = raw
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if raw.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("******{}", visible)
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_is_masked_in_debug() {
        let phone = Masked("+919876543210".to_string());
        assert_eq!(format!("{:?}", phone), "******3210");
        assert_eq!(phone.expose(), "+919876543210");
    }

    #[test]
    fn test_short_values_fully_hidden() {
        let pin = Masked("1234".to_string());
        assert_eq!(pin.to_string(), "****");
    }

    #[test]
    fn test_serializes_real_value() {
        let phone = Masked("+15550001111".to_string());
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+15550001111\"");
    }
}
