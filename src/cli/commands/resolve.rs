//! resolve command - Resolve a name or revision to a target kind

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::cli::args::Target;
use crate::cli::Context;
use crate::core::model::Ref;
use crate::core::types::RefName;
use crate::git::Git;
use crate::resolve::{Input, Resolver};
use crate::ui::output;

/// Resolve `input` to `target` and print the result.
///
/// Prints nothing (and `null` with `--json`) when a named branch or tag
/// does not exist.
pub fn resolve(ctx: &Context, input: &str, target: Target) -> Result<()> {
    let git = ctx.open()?;
    let resolver = Resolver::new(&git);
    let value = Input::from(input);
    let failed = || format!("Failed to resolve '{}'", input);

    match target {
        Target::ObjectId => {
            let reference = existing_ref(&git, input)?;
            let oid = resolver.object_id(Input::from(&reference)).with_context(failed)?;
            emit(ctx, oid)
        }
        Target::Commit => {
            let commit = resolver.commit(value).with_context(failed)?;
            emit_with(ctx, commit, |c| c.id().to_string())
        }
        Target::Branch => {
            let branch = resolver.branch(value).with_context(failed)?;
            emit_with(ctx, branch, |b| b.full_name().to_string())
        }
        Target::BranchName => emit(ctx, resolver.branch_name(value).with_context(failed)?),
        Target::Tag => {
            let tag = resolver.tag(value).with_context(failed)?;
            emit_with(ctx, tag, |t| t.full_name().to_string())
        }
        Target::TagName => emit(ctx, resolver.tag_name(value).with_context(failed)?),
        Target::Revision => emit(ctx, resolver.revision(value).with_context(failed)?),
    }
}

/// The object id target takes refs, so the argument must be a full ref name.
fn existing_ref(git: &Git, input: &str) -> Result<Ref> {
    let refname =
        RefName::new(input).with_context(|| format!("'{}' is not a valid ref name", input))?;
    if !git.ref_exists(&refname)? {
        bail!("No such ref: {}", refname);
    }
    Ok(Ref::new(refname))
}

fn emit<T: Serialize + std::fmt::Display>(ctx: &Context, value: Option<T>) -> Result<()> {
    emit_with(ctx, value, |v| v.to_string())
}

fn emit_with<T: Serialize>(
    ctx: &Context,
    value: Option<T>,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    if ctx.json {
        return output::json(&value);
    }
    if let Some(value) = &value {
        output::result(text(value));
    }
    Ok(())
}
