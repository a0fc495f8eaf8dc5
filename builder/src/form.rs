//! The working member list a user edits before submitting a split.

use collabsplit_types::{Member, MemberUpdate, MAX_MEMBERS};

use crate::error::BuildError;
use crate::request::{validate_percentages, SplitRequest};

/// Editable split definition plus the last user-facing error.
///
/// Edits never validate; validation happens in [`SplitForm::submit`]. Only
/// [`SplitForm::add_member`] can fail, because the member cap is hard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitForm {
    members: Vec<Member>,
    error: Option<BuildError>,
}

impl SplitForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing member list (e.g. parsed from command-line input).
    pub fn from_members(members: Vec<Member>) -> Self {
        Self {
            members,
            error: None,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The last error reported to the user, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Append a blank member.
    ///
    /// At [`MAX_MEMBERS`] the list is left untouched and the error is recorded.
    pub fn add_member(&mut self) -> Result<(), BuildError> {
        if self.members.len() >= MAX_MEMBERS {
            let err = BuildError::TooManyMembers { max: MAX_MEMBERS };
            tracing::debug!(members = self.members.len(), "member cap reached");
            self.error = Some(err.clone());
            return Err(err);
        }
        self.members.push(Member::blank());
        Ok(())
    }

    /// Remove the member at `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether a member was removed.
    pub fn remove_member(&mut self, index: usize) -> bool {
        if index >= self.members.len() {
            return false;
        }
        self.members.remove(index);
        true
    }

    /// Replace one field of the member at `index`. Out-of-range indices are ignored.
    ///
    /// Returns whether a member was updated.
    pub fn update_member(&mut self, index: usize, update: MemberUpdate) -> bool {
        match self.members.get_mut(index) {
            Some(member) => {
                member.apply(update);
                true
            }
            None => false,
        }
    }

    /// True iff the percentages sum to exactly 100.
    pub fn validate(&self) -> bool {
        validate_percentages(&self.members)
    }

    /// Validate the list and produce the request to submit.
    ///
    /// On failure the error is also recorded on the form; on success it is cleared.
    pub fn submit(&mut self) -> Result<SplitRequest, BuildError> {
        match SplitRequest::from_members(&self.members) {
            Ok(request) => {
                self.error = None;
                Ok(request)
            }
            Err(err) => {
                tracing::debug!(error = %err, "split form rejected");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabsplit_types::BasisPoints;

    fn form(shares: &[(&str, f64)]) -> SplitForm {
        SplitForm::from_members(shares.iter().map(|(a, p)| Member::new(*a, *p)).collect())
    }

    #[test]
    fn add_member_appends_blank() {
        let mut f = SplitForm::new();
        f.add_member().unwrap();
        assert_eq!(f.members(), &[Member::blank()]);
        assert!(f.error().is_none());
    }

    #[test]
    fn add_member_at_cap_sets_error_and_keeps_list() {
        let mut f = SplitForm::new();
        for _ in 0..MAX_MEMBERS {
            f.add_member().unwrap();
        }
        let before = f.members().to_vec();

        let err = f.add_member().unwrap_err();
        assert_eq!(err, BuildError::TooManyMembers { max: 10 });
        assert_eq!(f.len(), MAX_MEMBERS);
        assert_eq!(f.members(), before.as_slice());
        assert_eq!(f.error(), Some(&BuildError::TooManyMembers { max: 10 }));
    }

    #[test]
    fn remove_member_preserves_order() {
        let mut f = form(&[("a", 10.0), ("b", 20.0), ("c", 30.0), ("d", 40.0)]);
        assert!(f.remove_member(1));
        let addrs: Vec<&str> = f.members().iter().map(|m| m.address.as_str()).collect();
        assert_eq!(addrs, vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_member_out_of_range_is_noop() {
        let mut f = form(&[("a", 100.0)]);
        assert!(!f.remove_member(5));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn update_member_changes_only_target() {
        let mut f = form(&[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
        assert!(f.update_member(1, MemberUpdate::Percentage(55.0)));
        assert_eq!(
            f.members(),
            &[
                Member::new("a", 10.0),
                Member::new("b", 55.0),
                Member::new("c", 30.0)
            ]
        );
    }

    #[test]
    fn update_member_on_blank_rows_does_not_alias() {
        let mut f = SplitForm::new();
        f.add_member().unwrap();
        f.add_member().unwrap();
        f.update_member(0, MemberUpdate::Address("0xaa".into()));
        assert_eq!(f.members()[0].address, "0xaa");
        assert_eq!(f.members()[1], Member::blank());
    }

    #[test]
    fn update_member_out_of_range_is_noop() {
        let mut f = form(&[("a", 100.0)]);
        assert!(!f.update_member(3, MemberUpdate::Percentage(1.0)));
        assert_eq!(f.members(), &[Member::new("a", 100.0)]);
    }

    #[test]
    fn validate_follows_total() {
        assert!(form(&[("a", 40.0), ("b", 60.0)]).validate());
        assert!(!form(&[("a", 40.0), ("b", 59.0)]).validate());
        assert!(!SplitForm::new().validate());
    }

    #[test]
    fn submit_failure_is_recorded() {
        let mut f = form(&[("a", 40.0), ("b", 59.0)]);
        assert!(f.submit().is_err());
        assert_eq!(
            f.error(),
            Some(&BuildError::InvalidPercentageTotal { total: 99.0 })
        );
    }

    #[test]
    fn submit_success_clears_error() {
        let mut f = form(&[("a", 40.0), ("b", 59.0)]);
        let _ = f.submit();
        f.update_member(1, MemberUpdate::Percentage(60.0));
        let req = f.submit().unwrap();
        assert!(f.error().is_none());
        assert_eq!(
            req.basis_points(),
            &[BasisPoints::new(4000), BasisPoints::new(6000)]
        );
    }
}
