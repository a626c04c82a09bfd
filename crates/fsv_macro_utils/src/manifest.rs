use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

const FACADE_NAME: &str = "fsv_core";
const WORKSPACE_PREFIX: &str = "fsv_";

/// The caller's `Cargo.toml`, used to find how a workspace crate is reachable
/// from the crate a derive expands in.
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::name`.
/// 2. A `fsv_*` crate reached through the facade resolves to
///    `::fsv_core::short_name` (`fsv_reflect` -> `::fsv_core::reflect`).
/// 3. Steps 1-2 are repeated for `dev-dependencies`.
/// 4. Otherwise the path falls back to `::name`.
///
/// A crate deriving its own traits should declare
/// `extern crate self as name;` so the fallback also holds inside it.
///
/// # Example
///
/// ```rust
/// # use fsv_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("fsv_reflect"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn load(path: &Path) -> Self {
        let modified_time = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok();
        let manifest = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            manifest,
            modified_time,
        }
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments.push(syn::Ident::new(segment, Span::call_site()).into());
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(WORKSPACE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Returns the path of crate `name` as seen from the caller.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(&[name]);
        };

        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::absolute(&[name])
    }

    /// Runs `func` with the caller's manifest, parsing it at most once per
    /// modification of the file.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };

        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .ok();

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::load(&path);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        format!("::{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Some(Document::parse(text.to_owned().into_boxed_str()).unwrap()),
            modified_time: None,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nfsv_reflect = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("fsv_reflect")), "::fsv_reflect");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\nfsv_core = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("fsv_reflect")), "::fsv_core::reflect");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nfsv_core = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("fsv_binary")), "::fsv_core::binary");
        assert_eq!(path_string(&m.get_crate_path("serde")), "::serde");
    }
}
