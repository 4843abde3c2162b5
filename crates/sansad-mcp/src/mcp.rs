use rmcp::{
    ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use sansad::{MemberResolver, NameQuery, ResolveError, Role};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct McpServer {
    resolver: MemberResolver,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    pub fn new() -> Result<Self, anyhow::Error> {
        Ok(Self {
            resolver: MemberResolver::new()?,
            tool_router: Self::tool_router(),
        })
    }

    #[tool(
        name = "resolve_member",
        description = "Find an Indian MP or MLA on the PRS trackers (prsindia.org) by name. Searches the given role first and falls back to the other role. Returns profile details, performance metrics against national and state averages, and (for MPs) raw HTML activity tables. Constituency and state are echoed back, not used for matching."
    )]
    pub async fn resolve_member(
        &self,
        Parameters(query): Parameters<NameQuery>,
    ) -> Result<String, McpError> {
        let result = self
            .resolver
            .resolve_member(&query)
            .await
            .inspect_err(|e| log::error!("Failed to resolve '{}': {e}", query.name))
            .map_err(|e| match e {
                ResolveError::EmptyName(_) => McpError::invalid_params(e.to_string(), None),
            })?;

        let json = serde_json::to_string_pretty(&result).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize result: {e}"), None)
        })?;

        Ok(json)
    }

    #[tool(
        name = "list_candidates",
        description = "Show the slug variants and the tiered list of tracker URLs that resolve_member would probe for a name, without fetching anything. Set `reduced` to see the smaller fallback budget."
    )]
    pub async fn list_candidates(
        &self,
        Parameters(params): Parameters<ListCandidatesParams>,
    ) -> Result<String, McpError> {
        let plan = self.resolver.plan(&params.name, params.role, params.reduced);
        if plan.slugs.is_empty() {
            return Err(McpError::invalid_params(
                format!("Name '{}' yields no slug candidates", params.name),
                None,
            ));
        }

        let json = serde_json::to_string_pretty(&plan).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize candidates: {e}"), None)
        })?;

        Ok(json)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCandidatesParams {
    name: String,
    role: Role,
    #[serde(default)]
    reduced: bool,
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(include_str!("./instructions.md").to_string()),
            ..Default::default()
        }
    }
}
