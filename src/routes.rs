//! Route paths and URL generation for the config pages.

/// Config list page; target of every success/cancel redirect.
pub const INDEX_PATH: &str = "/channel/config";
pub const NEW_ROUTE: &str = "/channel/config/new/:adapter";
pub const EDIT_ROUTE: &str = "/channel/config/:id/edit";
pub const DELETE_ROUTE: &str = "/channel/config/:id/delete";

pub fn index_url(page: usize) -> String {
    if page <= 1 {
        INDEX_PATH.to_string()
    } else {
        format!("{}?page={}", INDEX_PATH, page)
    }
}

pub fn new_url(adapter: &str) -> String {
    format!("{}/new/{}", INDEX_PATH, urlencoding::encode(adapter))
}

pub fn edit_url(id: &str) -> String {
    format!("{}/{}/edit", INDEX_PATH, urlencoding::encode(id))
}

pub fn delete_url(id: &str) -> String {
    format!("{}/{}/delete", INDEX_PATH, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(index_url(1), "/channel/config");
        assert_eq!(index_url(3), "/channel/config?page=3");
        assert_eq!(new_url("webhook"), "/channel/config/new/webhook");
        assert_eq!(edit_url("newsletter"), "/channel/config/newsletter/edit");
        assert_eq!(delete_url("news letter"), "/channel/config/news%20letter/delete");
    }
}
