//! Element classification: how far an element's property setters can be
//! trusted to behave like the platform's.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use regex::Regex;

use crate::dom::{ComponentRegistry, ConstructorKind, DomElement};

/// The trust classes of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClassification {
    /// A platform element such as `<a>`, including customized builtins
    /// like `<a is="my-link">`.
    Builtin,
    /// A legacy element such as `<isindex>` that cannot be subclassed.
    Legacy,
    /// An author-defined element with a current definition.
    Custom,
    /// A valid custom-element name without a definition yet. A late
    /// definition may still upgrade it.
    Customizable,
}

impl ElementClassification {
    /// Returns `true` for elements whose behavior is defined by author code.
    pub fn is_author_defined(self) -> bool {
        matches!(
            self,
            ElementClassification::Custom | ElementClassification::Customizable
        )
    }
}

impl fmt::Display for ElementClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementClassification::Builtin => write!(f, "builtin"),
            ElementClassification::Legacy => write!(f, "legacy"),
            ElementClassification::Custom => write!(f, "custom"),
            ElementClassification::Customizable => write!(f, "customizable"),
        }
    }
}

/// Hyphenated names reserved by SVG and MathML.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

fn custom_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        const NAME_CHARS: &str = concat!(
            r"a-z.0-9_\x{B7}\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{37D}",
            r"\x{200C}\x{200D}\x{203F}-\x{2040}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}",
            r"\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}",
        );
        Regex::new(&format!("^[a-z][{NAME_CHARS}]*-[\\-{NAME_CHARS}]*$")).expect("valid regex")
    })
}

/// Returns `true` if `name` is a valid custom element name: a lowercase
/// letter, name characters, a hyphen, more name characters or hyphens, and
/// not one of the reserved names.
///
/// # Examples
///
/// ```
/// use binding_guard::classify::is_valid_custom_element_name;
///
/// assert!(is_valid_custom_element_name("my-element"));
/// assert!(is_valid_custom_element_name("math-α"));
/// assert!(!is_valid_custom_element_name("div"));
/// assert!(!is_valid_custom_element_name("My-Element"));
/// assert!(!is_valid_custom_element_name("font-face"));
/// ```
pub fn is_valid_custom_element_name(name: &str) -> bool {
    !RESERVED_NAMES.contains(&name) && custom_name_pattern().is_match(name)
}

/// Classifies elements against a component registry.
///
/// Registration status is re-read on every call, because a late definition
/// turns a [`Customizable`](ElementClassification::Customizable) tag into a
/// [`Custom`](ElementClassification::Custom) one. Only name validity and
/// legacy registrations are cached; both caches only grow.
pub struct Classifier {
    registry: Arc<dyn ComponentRegistry>,
    legacy_names: RwLock<HashSet<String>>,
    legacy_cursor: Mutex<usize>,
    scan_legacy: AtomicBool,
    valid_names: RwLock<HashMap<String, bool>>,
}

impl Classifier {
    /// Creates a classifier that consults `registry`.
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            registry,
            legacy_names: RwLock::new(HashSet::new()),
            legacy_cursor: Mutex::new(0),
            scan_legacy: AtomicBool::new(false),
            valid_names: RwLock::new(HashMap::new()),
        }
    }

    /// Enables scanning the registry's legacy registration log.
    ///
    /// Each later classification first absorbs log entries added since the
    /// previous scan.
    pub fn hint_uses_legacy_registration(&self) {
        self.scan_legacy.store(true, Ordering::Release);
    }

    /// Returns `true` if legacy registration scanning is enabled.
    pub fn uses_legacy_registration(&self) -> bool {
        self.scan_legacy.load(Ordering::Acquire)
    }

    /// Classifies an element by tag name and constructor kind.
    pub fn classify(&self, local_name: &str, constructor: ConstructorKind) -> ElementClassification {
        if self.uses_legacy_registration() {
            self.absorb_legacy_registrations();
        }

        if self.registry.is_defined(local_name) || self.is_legacy_registered(local_name) {
            return ElementClassification::Custom;
        }
        match constructor {
            ConstructorKind::UnknownElement => ElementClassification::Legacy,
            ConstructorKind::HtmlElement if self.is_valid_name(local_name) => {
                ElementClassification::Customizable
            }
            _ => ElementClassification::Builtin,
        }
    }

    /// Classifies `element`.
    pub fn classify_element(&self, element: &dyn DomElement) -> ElementClassification {
        self.classify(element.local_name(), element.constructor_kind())
    }

    fn is_legacy_registered(&self, name: &str) -> bool {
        self.legacy_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    fn is_valid_name(&self, name: &str) -> bool {
        if let Some(valid) = self
            .valid_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return *valid;
        }
        let valid = is_valid_custom_element_name(name);
        self.valid_names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), valid);
        valid
    }

    fn absorb_legacy_registrations(&self) {
        let mut cursor = self
            .legacy_cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let fresh = self.registry.legacy_registrations_from(*cursor);
        if fresh.is_empty() {
            return;
        }

        *cursor += fresh.len();
        tracing::debug!(
            count = fresh.len(),
            total = *cursor,
            "absorbed legacy element registrations"
        );
        self.legacy_names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(fresh);
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("uses_legacy_registration", &self.uses_legacy_registration())
            .finish_non_exhaustive()
    }
}
