//! Error Types
//!
//! Every engine operation checks its guards before touching a list, so an
//! error always means nothing was moved.

use thiserror::Error;

use crate::category::Category;
use crate::models::ChangesetId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    // Configuration errors: an interaction element encodes something unknown.
    #[error("unknown auto-move predicate `{0}`")]
    UnknownPredicate(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("element is missing attribute `{0}`")]
    MissingAttribute(&'static str),

    // Lookup failures: something referenced is gone at handling time.
    #[error("changeset {0} is not in the item store")]
    ChangesetNotFound(ChangesetId),
    #[error("changeset {id} is not listed in {category}")]
    NotInCategory { id: ChangesetId, category: Category },
    #[error("cannot find element `{0}`")]
    ElementNotFound(String),
    #[error("invalid drag payload `{0}`")]
    InvalidDragPayload(String),
    #[error("invalid changeset id attribute `{0}`")]
    InvalidItemId(String),

    #[error("invalid changeset data: {0}")]
    InvalidUniverse(String),
    #[error("virtual list widget unavailable: {0}")]
    WidgetUnavailable(String),
    #[error("triage board is not initialized")]
    NotReady,
}

pub type TriageResult<T> = Result<T, TriageError>;
