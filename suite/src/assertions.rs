//! Panicking checks shared by the live suites. Failures print the whole
//! response so a broken run can be diagnosed from the test log alone.

use reqwest::StatusCode;
use workbench_client::ApiResponse;

pub fn assert_status(response: &ApiResponse, expected: StatusCode) {
    assert!(
        response.status_code == expected,
        "expected status {}, got {} with body {}",
        expected,
        response.status_code,
        response.body
    );
}

pub fn assert_success(response: &ApiResponse) {
    assert!(
        response.is_success(),
        "expected a 2xx status, got {} with body {}",
        response.status_code,
        response.body
    );
}

/// A 400 problem-details response with a message about `field` that
/// contains `fragment`, ignoring case.
pub fn assert_validation_error(response: &ApiResponse, field: &str, fragment: &str) {
    assert_status(response, StatusCode::BAD_REQUEST);
    let messages = response.error_messages(field);
    assert!(
        !messages.is_empty(),
        "expected validation errors for `{}`, got body {}",
        field,
        response.body
    );
    let fragment_lower = fragment.to_lowercase();
    assert!(
        messages
            .iter()
            .any(|message| message.to_lowercase().contains(&fragment_lower)),
        "no `{}` error mentions {:?}: {:?}",
        field,
        fragment,
        messages
    );
}

/// A 400 whose problem details mention `fragment` anywhere: title, detail or
/// any field error.
pub fn assert_problem_mentions(response: &ApiResponse, fragment: &str) {
    assert_status(response, StatusCode::BAD_REQUEST);
    let mentioned = response
        .problem()
        .is_some_and(|problem| problem.mentions(fragment))
        || response.body_mentions(fragment);
    assert!(
        mentioned,
        "expected the error body to mention {:?}, got {}",
        fragment, response.body
    );
}

/// The backend reports missing entities as either 400 or 404, always with a
/// "not found" message.
pub fn assert_not_found(response: &ApiResponse) {
    assert!(
        matches!(
            response.status_code,
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND
        ),
        "expected 400 or 404 for a missing entity, got {} with body {}",
        response.status_code,
        response.body
    );
    assert!(
        response.body_mentions("not found"),
        "expected a not found message, got {}",
        response.body
    );
}

/// Fields every named resource echoes back.
pub trait Named {
    fn name(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
}

macro_rules! impl_named {
    ($($resource:ty),* $(,)?) => {
        $(
            impl Named for $resource {
                fn name(&self) -> Option<&str> {
                    self.name.as_deref()
                }

                fn description(&self) -> Option<&str> {
                    self.description.as_deref()
                }
            }
        )*
    };
}

macro_rules! impl_named_entity {
    ($($resource:ty),* $(,)?) => {
        $(
            impl Named for $resource {
                fn name(&self) -> Option<&str> {
                    Some(self.name.as_str())
                }

                fn description(&self) -> Option<&str> {
                    self.description.as_deref()
                }
            }
        )*
    };
}

impl_named!(
    workbench_client::NewNamespace,
    workbench_client::UpdateNamespace,
    workbench_client::NewProject,
    workbench_client::UpdateProject,
    workbench_client::NewFolder,
    workbench_client::UpdateFolder,
    workbench_client::NewObjectType,
    workbench_client::UpdateObjectType,
    workbench_client::NewObjectTypeGroup,
    workbench_client::UpdateObjectTypeGroup,
    workbench_client::NewSemanticModel,
    workbench_client::UpdateSemanticModel,
    workbench_client::NewAnalysis,
    workbench_client::UpdateAnalysis,
    workbench_client::NewDashboard,
    workbench_client::UpdateDashboard,
);

impl_named_entity!(
    workbench_client::Namespace,
    workbench_client::Project,
    workbench_client::Folder,
    workbench_client::ObjectType,
    workbench_client::ObjectTypeGroup,
    workbench_client::SemanticModel,
    workbench_client::Analysis,
    workbench_client::Dashboard,
);

/// What was submitted is what the server hands back.
pub fn assert_round_trip(submitted: &impl Named, fetched: &impl Named) {
    assert_eq!(submitted.name(), fetched.name(), "name did not round trip");
    assert_eq!(
        submitted.description(),
        fetched.description(),
        "description did not round trip"
    );
}
