// UI components
//
// Each panel is a free render function over &App (the list takes &mut App
// to memoize the sorted view and report sentinel visibility).

pub mod characters_panel;
pub mod filter_bar;
pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
