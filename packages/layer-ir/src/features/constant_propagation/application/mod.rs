pub mod run_sccp;

pub use run_sccp::RunSCCPUseCase;
