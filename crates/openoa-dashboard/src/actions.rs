//! User actions on the dashboard.
//!
//! Toggling only touches local [`Expansion`] state. Re-test actions are
//! forwarded to the orchestrator, which owns all results.

use openoa_diagnostics::{Diagnostics, DiagnosticsError};

use crate::selection::Expansion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Toggle(String),
    Retest(String),
    RetestAll,
}

pub async fn dispatch(
    action: Action,
    diagnostics: &Diagnostics,
    expansion: &mut Expansion,
) -> Result<(), DiagnosticsError> {
    match action {
        Action::Toggle(id) => {
            expansion.toggle(&id);
        }
        Action::Retest(id) => {
            diagnostics.test_one(&id).await?;
        }
        Action::RetestAll => {
            diagnostics.test_all().await?;
        }
    }
    Ok(())
}
