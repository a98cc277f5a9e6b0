pub mod badges;
pub mod model_service;
pub mod progression;
pub mod quiz_flow;
pub mod quiz_parser;
pub mod quiz_session;
pub mod session_store;
