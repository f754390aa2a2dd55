//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool creates its own route around a shared [`FredClient`].

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::fred::FredClient;

use super::definitions::{
    FredDashboardTool, GetFredDataTool, GetFredHistoricalTool, GetFredSeriesInfoTool,
    GetMultipleSeriesTool, SearchFredTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<FredClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetFredDataTool::create_route(client.clone()))
        .with_route(GetFredHistoricalTool::create_route(client.clone()))
        .with_route(SearchFredTool::create_route(client.clone()))
        .with_route(FredDashboardTool::create_route(client.clone()))
        .with_route(GetMultipleSeriesTool::create_route(client.clone()))
        .with_route(GetFredSeriesInfoTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::fred::transport::stub::StubTransport;
    use crate::domains::tools::definitions::fred::common::test_support::stub_client;

    struct TestServer {}

    fn test_client() -> Arc<FredClient> {
        let (_, client) = stub_client(StubTransport::new());
        Arc::new(client)
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_fred_data"));
        assert!(names.contains(&"get_fred_historical"));
        assert!(names.contains(&"search_fred"));
        assert!(names.contains(&"fred_dashboard"));
        assert!(names.contains(&"get_multiple_series"));
        assert!(names.contains(&"get_fred_series_info"));
    }

    #[test]
    fn test_registry_matches_router() {
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_every_tool_has_object_schema() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        for tool in router.list_all() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema",
                tool.name
            );
        }
    }
}
