//! Identity column encoding.
//!
//! [`IdentityValue`] is stored as prefixed TEXT so that textual, integral,
//! and byte identities never collide as natural-key components: `s:` for
//! text, `i:` for integers, `b:` for base64-encoded bytes. The encoding is
//! total and injective, which is what lets the unique natural-key index
//! stand in for tuple equality.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use turnstile_core::IdentityValue;

pub(crate) fn encode(identity: &IdentityValue) -> String {
    match identity {
        IdentityValue::Text(s) => format!("s:{s}"),
        IdentityValue::Int(n) => format!("i:{n}"),
        IdentityValue::Bytes(b) => format!("b:{}", STANDARD.encode(b)),
    }
}

pub(crate) fn decode(column: &str) -> Result<IdentityValue, String> {
    match column.split_once(':') {
        Some(("s", rest)) => Ok(IdentityValue::Text(rest.to_string())),
        Some(("i", rest)) => rest
            .parse()
            .map(IdentityValue::Int)
            .map_err(|e| format!("invalid integer identity {rest:?}: {e}")),
        Some(("b", rest)) => STANDARD
            .decode(rest)
            .map(IdentityValue::Bytes)
            .map_err(|e| format!("invalid byte identity {rest:?}: {e}")),
        _ => Err(format!("unknown identity encoding: {column:?}")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_each_variant() {
        for identity in [
            IdentityValue::wildcard(),
            IdentityValue::from("alice"),
            // Embedded separator must survive.
            IdentityValue::from("with:colon"),
            IdentityValue::from(""),
            IdentityValue::Int(0),
            IdentityValue::Int(-42),
            IdentityValue::Int(i64::MAX),
            IdentityValue::Bytes(vec![]),
            IdentityValue::Bytes(vec![0x00, 0xff, 0x10]),
        ] {
            assert_eq!(decode(&encode(&identity)).unwrap(), identity);
        }
    }

    #[test]
    fn variants_encode_distinctly() {
        assert_ne!(
            encode(&IdentityValue::from("1")),
            encode(&IdentityValue::Int(1))
        );
        assert_ne!(
            encode(&IdentityValue::from("MQ==")),
            encode(&IdentityValue::Bytes(vec![0x31]))
        );
    }

    #[test]
    fn rejects_unknown_encodings() {
        assert!(decode("x:whatever").is_err());
        assert!(decode("no-prefix").is_err());
        assert!(decode("i:not-a-number").is_err());
        assert!(decode("b:!!!").is_err());
    }
}
