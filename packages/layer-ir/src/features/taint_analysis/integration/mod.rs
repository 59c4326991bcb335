pub mod flow_sensitive_pta_integration;

pub use flow_sensitive_pta_integration::FlowSensitiveTaintAnalyzer;
