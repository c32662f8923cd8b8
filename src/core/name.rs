use crate::utils::error::{RegistryError, Result};

/// Final-label length bounds. Kept strict; widening requires a rule-set change.
const TLD_MIN_LEN: usize = 2;
const TLD_MAX_LEN: usize = 5;

/// Syntactic acceptance of a candidate domain name.
///
/// A valid name is two or more dot-separated labels with no empty label
/// (which also rules out leading and trailing dots), and a final label of
/// 2-5 ASCII letters. Case never affects validity.
pub fn validate_name(name: &str) -> Result<()> {
    let lowered = name.to_lowercase();
    let labels: Vec<&str> = lowered.split('.').collect();

    if labels.len() < 2 {
        return Err(RegistryError::InvalidNameFormat {
            name: name.to_string(),
        });
    }

    if labels.iter().any(|label| label.is_empty()) {
        return Err(RegistryError::InvalidNameFormat {
            name: name.to_string(),
        });
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < TLD_MIN_LEN
        || tld.len() > TLD_MAX_LEN
        || !tld.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Err(RegistryError::InvalidNameFormat {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Ordered suffix chain of a name, from the top-level label alone up to the
/// full name, lowercased. For `a.b.c.d.com` this is
/// `[com, d.com, c.d.com, b.c.d.com, a.b.c.d.com]`.
///
/// A lookup helper, not a validator: empty or structurally invalid input
/// yields an empty chain instead of an error.
pub fn suffix_chain(name: &str) -> Vec<String> {
    if name.is_empty() || validate_name(name).is_err() {
        return Vec::new();
    }

    let lowered = name.to_lowercase();
    let labels: Vec<&str> = lowered.split('.').collect();

    let mut chain = Vec::with_capacity(labels.len());
    for start in (0..labels.len()).rev() {
        chain.push(labels[start..].join("."));
    }
    chain
}
