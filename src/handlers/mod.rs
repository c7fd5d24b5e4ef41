// Two route families: the /architecte API surface and the /debug
// introspection endpoints. Token gating is applied per-route in the router,
// not here.
pub mod architecte;
pub mod debug;
