// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::token::Theme;

/// Button color when the theme has none.
pub const DEFAULT_BRAND_COLOR: &str = "#346df1";
/// Button text color when the theme has none.
pub const DEFAULT_BUTTON_TEXT: &str = "#fff";

const BACKGROUND: &str = "#f9f9f9";
const TEXT: &str = "#444";
const MAIN_BACKGROUND: &str = "#fff";

/// Subject line of the sign-in email.
pub fn subject(host: &str) -> String {
    format!("Sign in to {host}")
}

/// Plain-text body, for clients that don't render HTML.
pub fn text(url: &str, host: &str) -> String {
    format!("Sign in to {host}\n{url}\n\n")
}

/// HTML body.
///
/// A zero-width space follows every `.` of the host so that mail clients
/// don't turn it into a link. The recipient's address never appears.
pub fn html(url: &str, host: &str, theme: &Theme) -> String {
    let escaped_host = host.replace('.', ".&#8203;");
    let brand_color = theme.brand_color_or(DEFAULT_BRAND_COLOR);
    let button_text = theme.button_text_or(DEFAULT_BUTTON_TEXT);

    format!(
        r#"
<body style="background: {BACKGROUND};">
  <table width="100%" border="0" cellspacing="20" cellpadding="0"
    style="background: {MAIN_BACKGROUND}; max-width: 600px; margin: auto; border-radius: 10px;">
    <tr>
      <td align="center"
        style="padding: 10px 0px; font-size: 22px; font-family: Helvetica, Arial, sans-serif; color: {TEXT};">
        Sign in to <strong>{escaped_host}</strong>
      </td>
    </tr>
    <tr>
      <td align="center" style="padding: 20px 0;">
        <table border="0" cellspacing="0" cellpadding="0">
          <tr>
            <td align="center" style="border-radius: 5px;" bgcolor="{brand_color}"><a href="{url}"
                target="_blank"
                style="font-size: 18px; font-family: Helvetica, Arial, sans-serif; color: {button_text}; text-decoration: none; border-radius: 5px; padding: 10px 20px; border: 1px solid {brand_color}; display: inline-block; font-weight: bold;">Sign
                in</a></td>
          </tr>
        </table>
      </td>
    </tr>
    <tr>
      <td align="center"
        style="padding: 0px 0px 10px 0px; font-size: 16px; line-height: 22px; font-family: Helvetica, Arial, sans-serif; color: {TEXT};">
        If you did not request this email you can safely ignore it.
      </td>
    </tr>
  </table>
</body>
"#
    )
}
