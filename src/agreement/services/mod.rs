//! Application services for agreement views.

mod command;
mod controller;

pub use command::AgreementCommand;
pub use controller::{
    AgreementRow, ControllerError, ControllerResult, ControllerSettings, FailureKind,
    LifecycleViewController, ListScope, ViewSnapshot, ViewState,
};
