//! Test doubles for the launch seams

use super::process::{Process, ProcessBuilder};
use super::reload::{ReloadError, ReloadableProcessSpec, Reloader};
use std::cell::RefCell;

/// Records the transformation input and returns canned processes
#[derive(Default)]
pub struct FakeReloader {
    pub enabled: bool,
    pub error: Option<String>,
    pub received: RefCell<Option<(Process, ReloadableProcessSpec)>>,
}

impl FakeReloader {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Default::default()
        }
    }
}

impl Reloader for FakeReloader {
    fn should_enable_live_reload(&self) -> Result<bool, ReloadError> {
        match &self.error {
            Some(message) => Err(ReloadError::Other {
                message: message.clone(),
            }),
            None => Ok(self.enabled),
        }
    }

    fn transform_reloadable_processes(
        &self,
        original: &Process,
        spec: &ReloadableProcessSpec,
    ) -> (Process, Process) {
        *self.received.borrow_mut() = Some((original.clone(), spec.clone()));
        (
            ProcessBuilder::new("NonReloadable", "NonReloadable").build(),
            ProcessBuilder::new("Reloadable", "Reloadable").build(),
        )
    }
}
