use anyhow::Result;
use tracing::info;

use crate::{cli::ConfigArgs, AppCtx};

pub async fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    let mut settings = ctx.settings_store.load()?;
    settings.login = Some(args.login.to_string());
    settings.persist_session = args.persist_session;
    ctx.settings_store.save(&settings)?;
    info!("Configuration saved successfully ✅");
    Ok(())
}
