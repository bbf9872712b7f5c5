//! Model synthesis entry points.
//!
//! [`synthesize`] is a pure function of the parameter tuple; writing the
//! result is a separate, single step so callers decide where the bytes go.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::info;

use crate::{
    model::{
        ModelArtifact,
        ModelBuilder,
        ModelError,
        SectionKind,
        declarations::{declarations, header},
        equation::equation,
        queries::{ThresholdQuery, properties_heading, reachability},
        roles::{process, roles},
    },
    params::Parameters,
};

/// Build the full model script for `params`.
///
/// # Errors
///
/// Returns a [`ModelError`] if any generator rejects the parameters.
pub fn synthesize(params: &Parameters) -> Result<ModelArtifact, ModelError> {
    let regular = ThresholdQuery::regular(params)?;
    let consentful = ThresholdQuery::consentful(params)?;
    let artifact = ModelBuilder::new()
        .section(SectionKind::Header, header())
        .section(SectionKind::Declarations, declarations(params)?)
        .section(SectionKind::Equation, equation(params)?)
        .section(
            SectionKind::RegularQuery,
            properties_heading() + &regular.render(),
        )
        .section(SectionKind::ConsentfulQuery, consentful.render())
        .section(SectionKind::Reachability, reachability())
        .section(SectionKind::Roles, roles(params)?)
        .section(SectionKind::Process, process(params)?)
        .build();
    Ok(artifact)
}

/// Write `artifact` to `file` inside `dir`, replacing any previous content.
///
/// # Errors
///
/// Propagates I/O failures from the underlying directory handle.
pub fn write_model(dir: &Dir, file: &Utf8Path, artifact: &ModelArtifact) -> io::Result<()> {
    dir.write(file, artifact.render())
}

/// Write `artifact` to an arbitrary path on the host filesystem.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be opened or the file
/// cannot be written.
pub fn write_model_to_path(path: &Utf8Path, artifact: &ModelArtifact) -> io::Result<()> {
    let file = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let dir = Dir::open_ambient_dir(&parent, ambient_authority())?;
    write_model(&dir, Utf8Path::new(file), artifact)?;
    info!(%path, bytes = artifact.render().len(), "wrote model");
    Ok(())
}
