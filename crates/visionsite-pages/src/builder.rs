//! Static build: enumerate every route, render it, write one JSON document per
//! page plus `sitemap.xml` and `build-report.json`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use visionsite_core::{
    Provenance, Resolver, Result, Route, SiteCatalog, SiteConfig, SiteError,
};

use crate::document::{PageDocument, PageRenderer};
use crate::sitemap;

pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const REPORT_FILE: &str = "build-report.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub generated_at: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub total: usize,
    pub indexable: usize,
    /// Paths whose condition copy came from the search index.
    pub synthesized: Vec<String>,
    pub by_kind: BTreeMap<String, usize>,
    pub elapsed_ms: u128,
}

pub struct SiteBuilder<'a> {
    catalog: &'a SiteCatalog,
    base_url: String,
    output_dir: PathBuf,
    related_limit: usize,
    parallel: bool,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(catalog: &'a SiteCatalog, site: &SiteConfig) -> Self {
        Self {
            catalog,
            base_url: site.base_url.clone(),
            output_dir: site.output_dir.clone(),
            related_limit: site.related_limit,
            parallel: site.parallel,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn routes(&self) -> Vec<Route> {
        self.resolver().enumerate()
    }

    fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.catalog, self.related_limit)
    }

    /// Renders every enumerated route, in route order.
    pub fn render_all(&self) -> Result<Vec<PageDocument>> {
        self.render_with(&|_: &PageDocument| {})
    }

    fn render_with(&self, progress: &(dyn Fn(&PageDocument) + Sync)) -> Result<Vec<PageDocument>> {
        let resolver = self.resolver();
        let renderer = PageRenderer::new(self.catalog, self.base_url.clone());
        let routes = resolver.enumerate();

        let render = |route: &Route| -> Result<PageDocument> {
            let page = resolver.resolve(route)?;
            let doc = renderer.render(route, page)?;
            progress(&doc);
            Ok(doc)
        };

        if self.parallel {
            routes.par_iter().map(render).collect()
        } else {
            routes.iter().map(render).collect()
        }
    }

    pub fn build(&self) -> Result<BuildReport> {
        self.build_with_progress(|_| {})
    }

    /// `progress` is called once per rendered page, possibly from several
    /// threads at once.
    pub fn build_with_progress<F>(&self, progress: F) -> Result<BuildReport>
    where
        F: Fn(&PageDocument) + Sync,
    {
        let start = Instant::now();
        info!(
            "building site into {} ({} mode)",
            self.output_dir.display(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let docs = self.render_with(&progress)?;
        fs::create_dir_all(&self.output_dir)?;

        if self.parallel {
            docs.par_iter()
                .try_for_each(|doc| write_document(&self.output_dir, doc))?;
        } else {
            docs.iter()
                .try_for_each(|doc| write_document(&self.output_dir, doc))?;
        }

        let xml = sitemap::render(
            &self.base_url,
            docs.iter().filter(|d| d.is_indexable()).map(|d| d.path.as_str()),
        );
        fs::write(self.output_dir.join(SITEMAP_FILE), xml)?;

        let report = self.report(&docs, start.elapsed().as_millis());
        if !report.synthesized.is_empty() {
            warn!(
                "{} pages use synthesized condition copy",
                report.synthesized.len()
            );
        }
        fs::write(
            self.output_dir.join(REPORT_FILE),
            serde_json::to_string_pretty(&report)?,
        )?;

        info!(
            "wrote {} pages to {} in {}ms",
            report.total,
            self.output_dir.display(),
            report.elapsed_ms
        );
        Ok(report)
    }

    fn report(&self, docs: &[PageDocument], elapsed_ms: u128) -> BuildReport {
        let mut by_kind = BTreeMap::new();
        for doc in docs {
            *by_kind.entry(doc.kind().to_string()).or_insert(0) += 1;
        }

        BuildReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            total: docs.len(),
            indexable: docs.iter().filter(|d| d.is_indexable()).count(),
            synthesized: docs
                .iter()
                .filter(|d| d.provenance == Provenance::Synthesized)
                .map(|d| d.path.clone())
                .collect(),
            by_kind,
            elapsed_ms,
        }
    }
}

/// `/` maps to `index.json`; every other path to `{path}/index.json`.
pub fn document_path(output_dir: &Path, path: &str) -> Result<PathBuf> {
    let relative = path.trim_matches('/');
    if relative.split('/').any(|seg| seg == ".." || seg == ".") {
        return Err(SiteError::InvalidRoute(path.to_string()));
    }
    let dir = if relative.is_empty() {
        output_dir.to_path_buf()
    } else {
        output_dir.join(relative)
    };
    Ok(dir.join("index.json"))
}

fn write_document(output_dir: &Path, doc: &PageDocument) -> Result<()> {
    let file = document_path(output_dir, &doc.path)?;
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file, serde_json::to_string_pretty(doc)?)?;
    debug!("wrote {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        let out = Path::new("/tmp/site");
        assert_eq!(
            document_path(out, "/").unwrap(),
            PathBuf::from("/tmp/site/index.json")
        );
        assert_eq!(
            document_path(out, "/conditions/glaucoma/irvine").unwrap(),
            PathBuf::from("/tmp/site/conditions/glaucoma/irvine/index.json")
        );
        assert!(document_path(out, "/../etc").is_err());
    }
}
