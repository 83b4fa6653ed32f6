/// Clean user-submitted HTML using the ammonia library.
///
/// Whitelist-based: safe formatting tags (like <b>, <p>) survive, while <script>, <iframe>
/// and event-handler attributes are stripped. A <script> tag is removed with its content.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
