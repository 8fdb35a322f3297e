//! DOM/CSS contract shared by every behavior: selectors the page markup
//! provides and presentation classes the stylesheet reacts to.

// ── Selectors ───────────────────────────────────────────────────

pub const THEME_TOGGLE_ID: &str = "darkModeToggle";
pub const SUN_ICON: &str = ".fa-sun";
pub const MOON_ICON: &str = ".fa-moon";
pub const HEADER: &str = "header";
pub const NAV_CONTAINER: &str = ".nav-links";
pub const HAMBURGER: &str = ".hamburger";
pub const NAV_LINKS: &str = ".nav-links a";
pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
pub const SECTIONS: &str = "main section[id]";
pub const HERO_LINK: &str = ".nav-links a[href=\"#hero\"]";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
pub const FLOATING_LABELS: &str = ".form-group label";
pub const TEAM_MEMBERS: &str = ".team-member";
pub const CURRENT_YEAR_ID: &str = "currentYear";
pub const REVEAL_SINGLE: &str = ".animated-element";
pub const REVEAL_STAGGERED: &str = ".animated-element-staggered";
pub const BLOBS: [&str; 3] = [".blob1", ".blob2", ".blob3"];

// ── Attributes ──────────────────────────────────────────────────

/// Explicit stagger group name; falls back to parent-element ownership.
pub const STAGGER_GROUP_ATTR: &str = "data-stagger-group";

/// Handle assigned to each observed element so observer callbacks can map
/// a target back to tracker state.
pub const REVEAL_HANDLE_ATTR: &str = "data-reveal-handle";

/// Present on `<body>` when the host page boots the crate itself via
/// `start_with_config`.
pub const MANUAL_BOOT_ATTR: &str = "data-folio-manual";

// ── Presentation classes ────────────────────────────────────────

pub const DARK_MODE: &str = "dark-mode";
pub const SCROLLED: &str = "scrolled";
pub const NAV_ACTIVE: &str = "nav-active";
pub const TOGGLE: &str = "toggle";
pub const NO_SCROLL: &str = "no-scroll";
pub const FADE_IN: &str = "fade-in";
pub const ACTIVE: &str = "active";
pub const FLIPPED: &str = "flipped";
pub const PARALLAX_LAYER: &str = "parallax-layer";

// ── Media queries ───────────────────────────────────────────────

pub const PREFERS_DARK: &str = "(prefers-color-scheme: dark)";

// ── Contact form copy ───────────────────────────────────────────

pub const SENDING_LABEL: &str = "Sending... <i class=\"fas fa-spinner fa-spin\"></i>";
pub const MSG_SENT: &str = "Thank you for your message! We will get back to you soon.";
pub const MSG_REJECTED: &str = "Oops! There was a problem submitting your form. Please try again.";
pub const MSG_UNREACHABLE: &str =
    "Oops! There was a problem submitting your form. Check your network connection.";
