//! User-detail report formatting.

use chirpscope_twitter::User;

/// Render the profile block printed before the timeline analysis.
pub fn user_details(user: &User) -> String {
    let mut out = String::new();

    out.push_str(&format!("User Name: {}\n", user.name));
    out.push_str(&format!("Username: @{}\n", user.username));
    out.push_str(&format!(
        "Description: {}\n",
        user.description.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "Location: {}\n",
        user.location.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Followers: {}\n", user.followers()));
    out.push_str(&format!("Following: {}\n", user.following()));
    out.push_str(&format!(
        "Profile URL: {}",
        user.profile_image_url.as_deref().unwrap_or("-")
    ));

    out
}
