//! Host device classification.
//!
//! Classification is fixed for the lifetime of the process. The browser layer
//! builds it once from `navigator.userAgent`; native hosts construct it
//! directly.

/// Coarse device class driving control-visibility behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Pointer-driven: controls reveal on hover
    #[default]
    Desktop,
    /// Touch-driven: controls toggle on tap and auto-hide while playing
    Mobile,
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OsFamily {
    Ios,
    Android,
    MacOs,
    Windows,
    Linux,
    #[default]
    Other,
}

/// Browser engine family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserFamily {
    Firefox,
    Chrome,
    Safari,
    Edge,
    #[default]
    Other,
}

/// Static description of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostPlatform {
    /// Device class
    pub device: DeviceClass,
    /// Operating system
    pub os: OsFamily,
    /// Browser
    pub browser: BrowserFamily,
}

impl HostPlatform {
    /// Creates a platform description.
    pub fn new(device: DeviceClass, os: OsFamily, browser: BrowserFamily) -> Self {
        Self {
            device,
            os,
            browser,
        }
    }

    /// Classifies a browser user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();

        let os = if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            OsFamily::Ios
        } else if ua.contains("android") {
            OsFamily::Android
        } else if ua.contains("mac os x") || ua.contains("macintosh") {
            OsFamily::MacOs
        } else if ua.contains("windows") {
            OsFamily::Windows
        } else if ua.contains("linux") || ua.contains("x11") {
            OsFamily::Linux
        } else {
            OsFamily::Other
        };

        // Order matters: Edge and Chrome both advertise "safari", Edge also "chrome".
        let browser = if ua.contains("firefox") || ua.contains("fxios") {
            BrowserFamily::Firefox
        } else if ua.contains("edg/") || ua.contains("edga/") || ua.contains("edgios/") {
            BrowserFamily::Edge
        } else if ua.contains("chrome") || ua.contains("crios") || ua.contains("chromium") {
            BrowserFamily::Chrome
        } else if ua.contains("safari") {
            BrowserFamily::Safari
        } else {
            BrowserFamily::Other
        };

        let device = if ua.contains("mobi")
            || matches!(os, OsFamily::Ios | OsFamily::Android)
        {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        };

        Self {
            device,
            os,
            browser,
        }
    }

    /// Returns true for touch-driven hosts.
    pub fn is_mobile(&self) -> bool {
        self.device == DeviceClass::Mobile
    }
}
