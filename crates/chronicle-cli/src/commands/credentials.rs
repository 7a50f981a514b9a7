use chronicle_core::category::resolve_category;
use chronicle_core::model::Credential;

use crate::app::AppContext;
use crate::cli::{CredentialsAddArgs, CredentialsListArgs, IdArgs};
use crate::errors::CliError;
use crate::output::print_credentials;
use crate::ui::{header, print, receipt, warning};

pub fn handle_list(ctx: &AppContext, args: &CredentialsListArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let sync = ctx.open()?;
    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "credentials", None));
    }
    print_credentials(
        &ui_ctx,
        sync.credentials(),
        sync.categories(),
        args.show_passwords,
    )
}

pub fn handle_add(ctx: &AppContext, args: &CredentialsAddArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    if args.service.trim().is_empty() {
        return Err(CliError::invalid_input("Service name cannot be empty").into());
    }

    let mut sync = ctx.open()?;
    let category = match args.category.clone() {
        Some(name) => name,
        None => sync
            .categories()
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
    };
    if !resolve_category(&category, sync.categories()).is_known() {
        warning(
            &ui_ctx,
            &format!("Category \"{}\" does not exist; showing as Uncategorized", category),
        );
    }

    let credential = Credential::new(
        args.service.trim(),
        args.email.trim(),
        args.password.clone(),
        category,
    );
    let id = credential.id.clone();
    sync.add_credential(credential)?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Added credential", &[("ID", id.as_str())]),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut sync = ctx.open()?;
    sync.delete_credential(&args.id)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted credential", &[("ID", args.id.as_str())]),
        );
    }
    Ok(())
}
