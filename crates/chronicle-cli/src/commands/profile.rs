use chronicle_core::model::avatar_data_uri;

use crate::app::AppContext;
use crate::cli::{ProfileSetArgs, ProfileShowArgs};
use crate::errors::CliError;
use crate::helpers::avatar_mime;
use crate::output::print_profile;
use crate::ui::{header, print, receipt};

pub fn handle_show(ctx: &AppContext, args: &ProfileShowArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let sync = ctx.open()?;
    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "profile", None));
    }
    print_profile(&ui_ctx, sync.profile())
}

pub fn handle_set(ctx: &AppContext, args: &ProfileSetArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let nothing_to_do = args.name.is_none()
        && args.role.is_none()
        && args.avatar.is_none()
        && !args.clear_avatar
        && args.ai_key.is_none()
        && !args.clear_ai_key;
    if nothing_to_do {
        return Err(CliError::invalid_input_with_hint(
            "Nothing to update",
            "Hint: Pass --name, --role, --avatar, --ai-key or a --clear-* flag.",
        )
        .into());
    }

    // Build the avatar first so a bad image changes nothing.
    let avatar = match args.avatar.as_deref() {
        Some(path) => {
            let mime = avatar_mime(path)?;
            let bytes = std::fs::read(path).map_err(|e| {
                anyhow::anyhow!("Failed to read avatar {}: {}", path.display(), e)
            })?;
            Some(avatar_data_uri(mime, &bytes)?)
        }
        None => None,
    };

    let mut sync = ctx.open()?;
    let mut profile = sync.profile().clone();
    if let Some(name) = args.name.as_deref() {
        profile.name = name.trim().to_string();
    }
    if let Some(role) = args.role.as_deref() {
        profile.role = role.trim().to_string();
    }
    if let Some(uri) = avatar.as_deref() {
        profile.set_avatar(uri)?;
    }
    if args.clear_avatar {
        profile.clear_avatar();
    }
    if let Some(key) = args.ai_key.as_deref() {
        profile.ai_api_key = Some(key.to_string());
    }
    if args.clear_ai_key {
        profile.ai_api_key = None;
    }
    sync.save_profile(profile)?;

    if !ctx.quiet() {
        let name = sync.profile().name.clone();
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Updated profile", &[("Name", name.as_str())]),
        );
    }
    Ok(())
}
