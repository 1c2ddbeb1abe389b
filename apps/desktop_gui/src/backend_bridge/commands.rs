//! Backend commands queued from UI to backend worker.

use client_core::Effect;

pub enum BackendCommand {
    Execute(Effect),
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute(effect) => effect.name(),
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
