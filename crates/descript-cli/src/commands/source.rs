//! Template source selection shared by all commands.

use std::path::{Path, PathBuf};

use descript::{EnvTemplateSource, TemplateCatalog, TemplateSource};
use miette::{miette, Result};
use tracing::debug;

/// Where templates are read from.
#[derive(Debug, clap::Args)]
pub struct SourceArgs {
    /// Template catalog file (.json)
    #[arg(long, conflicts_with = "env")]
    pub templates: Option<PathBuf>,

    /// Read templates from environment variables
    #[arg(long)]
    pub env: bool,

    /// Prefix of template environment variables
    #[arg(long, default_value = "CTOR_ENSURE_", env = "DESCRIPT_PREFIX")]
    pub prefix: String,
}

impl SourceArgs {
    fn env_source(&self) -> EnvTemplateSource {
        EnvTemplateSource::builder()
            .prefix(self.prefix.clone())
            .build()
    }

    fn load_catalog(path: &Path) -> Result<TemplateCatalog> {
        let catalog = TemplateCatalog::load(path).map_err(|e| miette!("{}", e))?;
        debug!(path = %path.display(), templates = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Open the selected source for lookups.
    ///
    /// With no source selected, an empty catalog is used.
    pub fn open(&self) -> Result<Box<dyn TemplateSource>> {
        if let Some(path) = &self.templates {
            return Ok(Box::new(Self::load_catalog(path)?));
        }
        if self.env {
            return Ok(Box::new(self.env_source()));
        }
        Ok(Box::new(TemplateCatalog::new()))
    }

    /// Read every template of the selected source into a catalog.
    pub fn catalog(&self) -> Result<TemplateCatalog> {
        if let Some(path) = &self.templates {
            return Self::load_catalog(path);
        }
        if self.env {
            return Ok(self.env_source().to_catalog());
        }
        Err(miette!("no template source: pass --templates <file> or --env"))
    }
}
