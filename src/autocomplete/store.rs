use super::{AutocompleteError, FieldKind};

/// Raw input of a field plus, for model, the make it is scoped to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldQuery {
    pub text: String,
    pub scope: Option<String>,
}

impl FieldQuery {
    pub fn new(text: impl Into<String>, scope: Option<String>) -> Self {
        Self {
            text: text.into(),
            scope,
        }
    }
}

/// Identity of one issued lookup. Responses carry it back so the store can
/// tell whether they are still wanted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LookupTicket {
    pub field: FieldKind,
    pub seq: u64,
    pub query: FieldQuery,
}

/// A lookup the host should send to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LookupRequest {
    pub ticket: LookupTicket,
    pub limit: Option<u32>,
}

impl LookupRequest {
    pub fn field(&self) -> FieldKind {
        self.ticket.field
    }

    pub fn text(&self) -> &str {
        &self.ticket.query.text
    }

    pub fn scope_make(&self) -> Option<&str> {
        self.ticket.query.scope.as_deref()
    }
}

/// Last resolved (or in-flight) suggestion set of one field.
#[derive(Clone, Debug, Default)]
pub(crate) struct CandidateList {
    items: Vec<String>,
    loading: bool,
    latest_issued: u64,
}

impl CandidateList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a new lookup as in flight and hand out its ticket.
    pub fn begin(&mut self, field: FieldKind, query: FieldQuery) -> LookupTicket {
        self.latest_issued = self.latest_issued.saturating_add(1);
        self.loading = true;
        LookupTicket {
            field,
            seq: self.latest_issued,
            query,
        }
    }

    fn check(&mut self, ticket: &LookupTicket, current: &FieldQuery) -> Result<(), AutocompleteError> {
        let stale = AutocompleteError::StaleResponse {
            field: ticket.field,
            seq: ticket.seq,
        };

        if ticket.seq != self.latest_issued {
            // A newer lookup is still in flight (or was already applied).
            return Err(stale);
        }
        if ticket.query != *current {
            // Latest issued, but the input moved on before it came back.
            self.loading = false;
            return Err(stale);
        }
        Ok(())
    }

    /// Apply a successful response. Replaces the items wholesale.
    pub fn resolve(
        &mut self,
        ticket: &LookupTicket,
        items: Vec<String>,
        current: &FieldQuery,
    ) -> Result<usize, AutocompleteError> {
        self.check(ticket, current)?;
        self.items = items;
        self.loading = false;
        Ok(self.items.len())
    }

    /// Apply a failed response: the field shows an empty list.
    pub fn fail(&mut self, ticket: &LookupTicket, current: &FieldQuery) -> Result<(), AutocompleteError> {
        self.check(ticket, current)?;
        self.items.clear();
        self.loading = false;
        Ok(())
    }

    /// Empty the list and invalidate whatever is in flight.
    pub fn clear(&mut self) {
        self.items.clear();
        self.loading = false;
        self.latest_issued = self.latest_issued.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_query(text: &str) -> FieldQuery {
        FieldQuery::new(text, None)
    }

    #[test]
    fn test_resolve_replaces_items() {
        let mut list = CandidateList::default();
        let t = list.begin(FieldKind::Make, make_query("To"));
        assert!(list.is_loading());

        let n = list
            .resolve(&t, vec!["Toyota".into(), "Tesla".into()], &make_query("To"))
            .expect("current response applies");
        assert_eq!(n, 2);
        assert!(!list.is_loading());

        let t2 = list.begin(FieldKind::Make, make_query("Tes"));
        list.resolve(&t2, vec!["Tesla".into()], &make_query("Tes"))
            .expect("current response applies");
        assert_eq!(list.items(), &["Tesla".to_string()]);
    }

    #[test]
    fn test_out_of_order_response_dropped() {
        let mut list = CandidateList::default();
        let old = list.begin(FieldKind::Make, make_query("Au"));
        let new = list.begin(FieldKind::Make, make_query("Audi"));

        list.resolve(&new, vec!["Audi".into()], &make_query("Audi"))
            .expect("latest applies");

        let err = list
            .resolve(&old, vec!["Audi".into(), "Austin".into()], &make_query("Audi"))
            .unwrap_err();
        assert_eq!(
            err,
            AutocompleteError::StaleResponse {
                field: FieldKind::Make,
                seq: old.seq
            }
        );
        assert_eq!(list.items(), &["Audi".to_string()]);
    }

    #[test]
    fn test_response_for_outdated_text_clears_loading() {
        let mut list = CandidateList::default();
        let t = list.begin(FieldKind::Make, make_query("Fo"));
        assert!(list.resolve(&t, vec!["Ford".into()], &make_query("For")).is_err());
        assert!(!list.is_loading());
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear_invalidates_in_flight() {
        let mut list = CandidateList::default();
        let t = list.begin(FieldKind::Make, make_query("B"));
        list.clear();
        assert!(!list.is_loading());
        assert!(list.resolve(&t, vec!["BMW".into()], &make_query("B")).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_failure_empties_list() {
        let mut list = CandidateList::default();
        let t = list.begin(FieldKind::Make, make_query("Ho"));
        list.resolve(&t, vec!["Honda".into()], &make_query("Ho")).unwrap();

        let t2 = list.begin(FieldKind::Make, make_query("Hon"));
        list.fail(&t2, &make_query("Hon")).expect("current failure applies");
        assert!(list.is_empty());
        assert!(!list.is_loading());
    }
}
