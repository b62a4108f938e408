//! Manual-dispatch workflow classification
//!
//! A workflow can be triggered on demand only if its definition file declares
//! `workflow_dispatch` in its `on:` section. The trigger section may take any
//! of the three shapes GitHub accepts:
//!
//! ```yaml
//! on: workflow_dispatch            # single event
//! on: [push, workflow_dispatch]    # list of events
//! on:                              # mapping of events to configuration
//!   workflow_dispatch:
//!     inputs: {}
//! ```

use crate::client::GitHubClient;
use crate::error::{ClientError, Result};
use crate::types::Workflow;
use log::debug;
use serde_yaml::Value;

/// Trigger key that marks a workflow as manually dispatchable
pub const MANUAL_DISPATCH: &str = "workflow_dispatch";

/// Whether a workflow definition declares a manual-dispatch trigger
///
/// Fails with [`ClientError::Classification`] when the text is not YAML or
/// its top level is not a mapping. An empty definition, or one without an
/// `on:` section, is simply not dispatchable.
pub fn declares_manual_dispatch(path: &str, content: &str) -> Result<bool> {
    let document: Value =
        serde_yaml::from_str(content).map_err(|e| classification_error(path, e.to_string()))?;

    let document = match document {
        Value::Mapping(document) => document,
        Value::Null => return Ok(false),
        _ => {
            return Err(classification_error(
                path,
                "top level of a workflow must be a mapping",
            ))
        }
    };

    let declared = match document.get("on") {
        Some(Value::String(event)) => event == MANUAL_DISPATCH,
        Some(Value::Sequence(events)) => events
            .iter()
            .any(|event| event.as_str() == Some(MANUAL_DISPATCH)),
        Some(Value::Mapping(events)) => events.contains_key(MANUAL_DISPATCH),
        _ => false,
    };
    Ok(declared)
}

/// List the workflows of a repository that can be dispatched manually
///
/// Fetches every definition file, one request per workflow, in the order
/// the API lists them. The first fetch or parse failure aborts the whole
/// call; no partial result is returned.
pub async fn triggerable_workflows<C>(client: &C, repository: &str) -> Result<Vec<Workflow>>
where
    C: GitHubClient + ?Sized,
{
    let workflows = client.list_workflows(repository).await?;
    let mut triggerable = Vec::new();

    for workflow in workflows {
        let content = client
            .fetch_workflow_file(repository, &workflow.path, None)
            .await?;

        if declares_manual_dispatch(&workflow.path, &content)? {
            triggerable.push(workflow);
        } else {
            debug!("{} in {} is not dispatchable", workflow.path, repository);
        }
    }

    debug!(
        "{} triggerable workflow(s) in {}",
        triggerable.len(),
        repository
    );
    Ok(triggerable)
}

fn classification_error(path: &str, message: impl Into<String>) -> ClientError {
    ClientError::Classification {
        path: path.to_string(),
        message: message.into(),
    }
}
