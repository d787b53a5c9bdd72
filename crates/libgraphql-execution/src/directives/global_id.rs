use crate::directives::DirectiveUsageError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use indexmap::IndexMap;
use serde_json::Value;

type Result<T> = std::result::Result<T, DirectiveUsageError>;

const SCHEME: &str = "gid://";
const DIRECTIVE_PATH_SEGMENT: &str = "Directive";
const ARGS_PARAM: &str = "args=";

/// The portable identity of a directive kind, or of a directive instance
/// together with its non-null arguments.
///
/// Its string form is `gid://<namespace>/Directive/<name>`, followed by
/// `?args=<...>` when arguments are present. The arguments are JSON-encoded
/// and then base64-encoded with the URL-safe alphabet, so the whole id can be
/// embedded in URLs.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveGlobalId {
    args: Option<IndexMap<String, Value>>,
    directive: String,
    namespace: String,
}
impl DirectiveGlobalId {
    pub fn new(
        namespace: impl AsRef<str>,
        directive: impl AsRef<str>,
        args: Option<IndexMap<String, Value>>,
    ) -> Self {
        Self {
            args: args.filter(|args| !args.is_empty()),
            directive: directive.as_ref().to_string(),
            namespace: namespace.as_ref().to_string(),
        }
    }

    pub fn args(&self) -> Option<&IndexMap<String, Value>> {
        self.args.as_ref()
    }

    /// The GraphQL-facing name of the directive kind.
    pub fn directive(&self) -> &str {
        self.directive.as_str()
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    pub fn parse(global_id: &str) -> Result<Self> {
        let invalid = |reason: &str| DirectiveUsageError::InvalidGlobalId {
            global_id: global_id.to_string(),
            reason: reason.to_string(),
        };

        let rest = global_id.trim()
            .strip_prefix(SCHEME)
            .ok_or_else(|| invalid("missing the `gid://` prefix"))?;
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        let segments: Vec<&str> = path.split('/').collect();
        let [namespace, kind, directive] = segments.as_slice() else {
            return Err(invalid("expected `<namespace>/Directive/<name>`"));
        };
        if *kind != DIRECTIVE_PATH_SEGMENT {
            return Err(invalid("does not identify a directive"));
        }
        if namespace.is_empty() || directive.is_empty() {
            return Err(invalid("namespace and directive name must not be empty"));
        }

        let args = match query {
            None => None,
            Some(query) => {
                let encoded = query.strip_prefix(ARGS_PARAM)
                    .ok_or_else(|| invalid("unrecognized query parameter"))?;
                let bytes = URL_SAFE_NO_PAD.decode(encoded)
                    .map_err(|e| invalid(&format!("arguments are not valid base64: {e}")))?;
                let args: IndexMap<String, Value> = serde_json::from_slice(&bytes)
                    .map_err(|e| invalid(&format!("arguments are not a JSON object: {e}")))?;
                Some(args)
            },
        };

        Ok(Self::new(namespace, directive, args))
    }
}
impl std::fmt::Display for DirectiveGlobalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{SCHEME}{}/{DIRECTIVE_PATH_SEGMENT}/{}",
            self.namespace,
            self.directive,
        )?;
        if let Some(args) = &self.args {
            let json = serde_json::to_vec(args).map_err(|_| std::fmt::Error)?;
            write!(f, "?{ARGS_PARAM}{}", URL_SAFE_NO_PAD.encode(json))?;
        }
        Ok(())
    }
}
impl std::str::FromStr for DirectiveGlobalId {
    type Err = DirectiveUsageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
