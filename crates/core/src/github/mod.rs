//! GitHub user lookups over the GraphQL API.

pub mod client;
pub mod endpoint;
pub mod query;
pub mod response;
pub mod token;

pub use client::GraphQlClient;
pub use endpoint::{graphql_endpoint, DEFAULT_API_URL};
pub use query::{build_user_query, query_body};
pub use response::{interpret_response, missing_token_scopes, REQUIRED_SCOPES};
pub use token::resolve_token;
