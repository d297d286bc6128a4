//! Source discovery by following `mod` declarations from `lib.rs`.
//!
//! Only modules the library compiles outside tests are returned: a
//! `#[cfg(test)] mod tests;` is never followed, and files no declaration
//! reaches are never read.

use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::is_cfg_test;
use crate::{ArchitectureLintError, LintSource};

/// Every non-test module of the crate rooted at `src_dir/lib.rs`.
pub(crate) fn discover(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut walker = Walker {
        src_dir,
        sources: Vec::new(),
    };
    walker.visit(&src_dir.join("lib.rs"), Vec::new(), true)?;
    Ok(walker.sources)
}

struct Walker<'a> {
    src_dir: &'a Path,
    sources: Vec<LintSource>,
}

impl Walker<'_> {
    /// Read `file` as `module`, then its declared children.
    ///
    /// `owns_dir` is true for `lib.rs` and `mod.rs`, whose children live
    /// beside them rather than in a directory named after the module.
    fn visit(
        &mut self,
        file: &Path,
        module: Vec<String>,
        owns_dir: bool,
    ) -> Result<(), ArchitectureLintError> {
        let contents = fs::read_to_string(file).map_err(|source| ArchitectureLintError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let parsed = syn::parse_file(&contents).map_err(|error| ArchitectureLintError::Parse {
            file: self.relative(file),
            message: error.to_string(),
        })?;

        let dir = file.parent().unwrap_or(self.src_dir);
        let child_dir = match (owns_dir, file.file_stem()) {
            (false, Some(stem)) => dir.join(stem),
            _ => dir.to_path_buf(),
        };
        for item in &parsed.items {
            let syn::Item::Mod(decl) = item else {
                continue;
            };
            if decl.content.is_some() || is_cfg_test(&decl.attrs) {
                continue;
            }
            let name = decl.ident.to_string();
            let mut child = module.clone();
            child.push(name.clone());
            let (child_file, child_owns_dir) =
                self.resolve(file, dir, &child_dir, &name, &decl.attrs, &child)?;
            self.visit(&child_file, child, child_owns_dir)?;
        }

        self.sources.push(LintSource {
            module,
            file: self.relative(file),
            contents,
        });
        Ok(())
    }

    fn resolve(
        &self,
        declared_in: &Path,
        dir: &Path,
        child_dir: &Path,
        name: &str,
        attrs: &[syn::Attribute],
        module: &[String],
    ) -> Result<(PathBuf, bool), ArchitectureLintError> {
        if let Some(custom) = path_attribute(attrs) {
            let owns_dir = custom.ends_with("mod.rs");
            return Ok((dir.join(custom), owns_dir));
        }
        let flat = child_dir.join(format!("{name}.rs"));
        if flat.is_file() {
            return Ok((flat, false));
        }
        let nested = child_dir.join(name).join("mod.rs");
        if nested.is_file() {
            return Ok((nested, true));
        }
        Err(ArchitectureLintError::MissingModule {
            module: module.join("::"),
            declared_in: self.relative(declared_in),
        })
    }

    fn relative(&self, file: &Path) -> PathBuf {
        file.strip_prefix(self.src_dir)
            .map_or_else(|_| file.to_path_buf(), Path::to_path_buf)
    }
}

/// Value of a `#[path = "..."]` attribute.
fn path_attribute(attrs: &[syn::Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| match &attr.meta {
        syn::Meta::NameValue(meta) if meta.path.is_ident("path") => match &meta.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(value),
                ..
            }) => Some(value.value()),
            _ => None,
        },
        _ => None,
    })
}
