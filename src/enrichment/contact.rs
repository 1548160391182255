//! Contact selection - which phone and email to report for a matched lead.

use super::domain::Contact;

/// Which listed phone number belongs to the lead.
///
/// The people-search detail page lists an associated number ahead of the
/// person's own one, so the default is the second listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhonePolicy {
    /// 1-based position in the phone list for the matched address
    position: usize,
}

impl PhonePolicy {
    pub const DEFAULT_POSITION: usize = 2;

    /// Returns `None` for position 0.
    pub fn at_position(position: usize) -> Option<Self> {
        (position > 0).then_some(Self { position })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The phone at the policy position, absent if the list is too short or
    /// the entry there is blank.
    pub fn pick<'a, S: AsRef<str>>(&self, phones: &'a [S]) -> Option<&'a str> {
        phones
            .get(self.position - 1)
            .map(|phone| phone.as_ref().trim())
            .filter(|phone| !phone.is_empty())
    }
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
        }
    }
}

/// Ordered list of preferred email domains; the first domain with a listed
/// address wins, anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPreference {
    domains: Vec<String>,
}

impl EmailPreference {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn pick<'a, S: AsRef<str>>(&self, emails: &'a [S]) -> Option<&'a str> {
        self.domains.iter().find_map(|domain| {
            emails
                .iter()
                .map(|email| email.as_ref())
                .find(|email| email_domain(email) == Some(domain.as_str()))
        })
    }
}

impl Default for EmailPreference {
    fn default() -> Self {
        Self::new(["gmail.com", "yahoo.com"])
    }
}

fn email_domain(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, domain)| domain)
}

/// Picks the phone and email to report from a matched candidate.
#[derive(Debug, Clone, Default)]
pub struct ContactSelector {
    phone_policy: PhonePolicy,
    email_preference: EmailPreference,
}

impl ContactSelector {
    pub fn new(phone_policy: PhonePolicy, email_preference: EmailPreference) -> Self {
        Self {
            phone_policy,
            email_preference,
        }
    }

    /// `None` when no phone could be chosen; the email alone is never enough.
    pub fn select<P, E>(&self, phones: &[P], emails: &[E]) -> Option<Contact>
    where
        P: AsRef<str>,
        E: AsRef<str>,
    {
        let phone = self.phone_policy.pick(phones)?;
        Some(Contact {
            phone: phone.to_string(),
            email: self.email_preference.pick(emails).map(str::to_string),
        })
    }
}
