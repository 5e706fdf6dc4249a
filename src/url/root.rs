use crate::{ConfigError, ConfigResult};
use url::Url;

/// The documentation root every fetched page must fall under
///
/// The root is always stored with a trailing `/` so that joining relative
/// paths and prefix checks behave the same whether or not the configured
/// value had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRoot {
    base: Url,
}

impl DocRoot {
    /// Parses and normalizes a root URL
    ///
    /// # Examples
    ///
    /// ```
    /// use javadoc_harvest::url::DocRoot;
    ///
    /// let root = DocRoot::parse("https://docs.example.com/api").unwrap();
    /// assert_eq!(root.as_url().as_str(), "https://docs.example.com/api/");
    /// ```
    pub fn parse(root: &str) -> ConfigResult<Self> {
        let mut base = Url::parse(root)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", root, e)))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "root_url must use http or https, got: {}",
                base.scheme()
            )));
        }

        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "root_url '{}' has no host",
                root
            )));
        }

        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    pub fn as_url(&self) -> &Url {
        &self.base
    }

    /// Resolves a path relative to the root
    pub fn join(&self, relative: &str) -> ConfigResult<Url> {
        self.base.join(relative).map_err(|e| {
            ConfigError::InvalidUrl(format!("Can't resolve '{}' against root: {}", relative, e))
        })
    }

    /// Returns the root-relative path of `url` (query and fragment excluded)
    ///
    /// Fails with [`ConfigError::OutsideRoot`] when the URL has a different
    /// origin or a path that doesn't start with the root's path.
    pub fn relative_path(&self, url: &Url) -> ConfigResult<String> {
        let same_origin = url.scheme() == self.base.scheme()
            && url.host_str() == self.base.host_str()
            && url.port_or_known_default() == self.base.port_or_known_default();

        match url.path().strip_prefix(self.base.path()) {
            Some(suffix) if same_origin => Ok(suffix.to_string()),
            _ => Err(ConfigError::OutsideRoot {
                url: url.to_string(),
                root: self.base.to_string(),
            }),
        }
    }
}
