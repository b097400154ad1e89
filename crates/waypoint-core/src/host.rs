//! Host contract
//!
//! The page/router that embeds Waypoint implements these traits. All methods
//! take `&self`; implementations use interior mutability where they need it.
//! Notifications flowing the other way (native back, navigation started,
//! unload) are plain method calls on the guard.

/// Read access to the current page address
pub trait Location {
    /// Full URL of the current page, including the query string
    fn current_url(&self) -> String;
}

/// Navigation actions provided by the host
pub trait Router: Location {
    /// Number of frames in the platform history of this tab
    fn history_depth(&self) -> usize;

    /// Start an in-app navigation to `url`
    fn navigate(&self, url: &str);

    /// Step the platform history back by one frame
    fn go_back_one_frame(&self);

    /// Push an extra frame for the current URL so the next native back
    /// gesture is observable before the page is left
    fn push_synthetic_frame(&self);
}
