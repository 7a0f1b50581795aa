//! Handlers for model generation commands (ListModels, SwitchModel).

use marquee_engine::ServingContext;

use crate::{Output, Result};

/// Handle `Command::ListModels`.
pub fn list_models(ctx: &ServingContext) -> Result<Output> {
    Ok(Output::Models(ctx.list_models()))
}

/// Handle `Command::SwitchModel { name }`.
///
/// Failures leave the previous generation active and are always returned
/// to the caller.
pub fn switch_model(ctx: &ServingContext, name: String) -> Result<Output> {
    let info = ctx.switch_model(&name)?;
    Ok(Output::Switched {
        name: info.name,
        display_name: info.display_name,
    })
}
