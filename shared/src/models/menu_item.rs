//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

/// Update menu item payload (absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    /// `None` keeps the image, `Some(None)` (an explicit `null`) removes it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
    pub available: Option<bool>,
}

/// Marks a field as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Menu listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    /// Only return items with this availability
    pub available: Option<bool>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_image_url_distinguishes_null_from_absent() {
        let absent: MenuItemUpdate = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(absent.image_url, None);

        let cleared: MenuItemUpdate = serde_json::from_str(r#"{"imageUrl": null}"#).unwrap();
        assert_eq!(cleared.image_url, Some(None));

        let set: MenuItemUpdate =
            serde_json::from_str(r#"{"imageUrl": "/uploads/a.png"}"#).unwrap();
        assert_eq!(set.image_url, Some(Some("/uploads/a.png".to_string())));
    }
}
