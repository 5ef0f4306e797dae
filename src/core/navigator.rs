use crate::core::normalize::normalize;
use crate::core::resolver::{CategoryResolver, MenuTarget};
use crate::domain::ports::{Element, Locator, Page, WaitPolicy};
use crate::utils::error::Result;
use tracing::{info, warn};

/// DOM anchors of the CEPEA home page.
pub mod anchors {
    pub const CATEGORY_WRAPPER_ID: &str = "imagenet-wrap-categoria";
    pub const CATEGORY_ID: &str = "imagenet-categoria";
    pub const CATEGORY_COLUMN_CLASS: &str = "imagenet-col-max.imagenet-ma";
    pub const MENU_CLASS: &str = "imagenet-seg-menu-indicador";
    pub const LINKS_AFTER_TABLE_CLASS: &str =
        "imagenet-links-after-table.imagenet-col-2.imagenet-pa-l.imagenet-bb.imagenet-fl";
    pub const MORE_VALUES_TEXT: &str = "Mais valores";
    pub const INDICATOR_TABLE_ID: &str = "imagenet-indicador1";
}

pub struct Navigator<'a, P: Page> {
    page: &'a P,
    resolver: &'a CategoryResolver,
    wait: WaitPolicy,
}

impl<'a, P: Page> Navigator<'a, P> {
    pub fn new(page: &'a P, resolver: &'a CategoryResolver, wait: WaitPolicy) -> Self {
        Self {
            page,
            resolver,
            wait,
        }
    }

    /// Selects the crop's category and expands it, returning the indicator
    /// table once it is visible.
    pub async fn open_detail_table(&self, crop: &str) -> Result<P::Element> {
        let wrapper = self
            .page
            .wait_visible(&Locator::id(anchors::CATEGORY_WRAPPER_ID), self.wait)
            .await?;
        info!("Div '{}' found for crop {}", anchors::CATEGORY_WRAPPER_ID, crop);

        let category = wrapper.find(&Locator::id(anchors::CATEGORY_ID)).await?;
        let column = category
            .find(&Locator::class(anchors::CATEGORY_COLUMN_CLASS))
            .await?;
        let menu = column.find(&Locator::class(anchors::MENU_CLASS)).await?;

        let target = self.resolver.resolve(crop);
        self.click_menu_item(&menu, &target, crop).await?;

        let links = self
            .page
            .wait_visible(&Locator::class(anchors::LINKS_AFTER_TABLE_CLASS), self.wait)
            .await?;
        info!("Div 'imagenet-links-after-table' found for crop {}", crop);

        let more_values = links
            .find(&Locator::link_text_contains(anchors::MORE_VALUES_TEXT))
            .await?;
        more_values.click().await?;
        info!("Clicked '{}' for crop {}", anchors::MORE_VALUES_TEXT, crop);

        self.page
            .wait_visible(&Locator::id(anchors::INDICATOR_TABLE_ID), self.wait)
            .await
    }

    /// Clicks the link of the first `<li>` matching `target`. Returns false
    /// when nothing matched; the page is then left as it was.
    async fn click_menu_item(
        &self,
        menu: &P::Element,
        target: &MenuTarget,
        crop: &str,
    ) -> Result<bool> {
        for item in menu.find_all(&Locator::tag("li")).await? {
            let item_text = normalize(item.text().await?.trim());
            if target.matches(&item_text) {
                let link = item.find(&Locator::tag("a")).await?;
                link.click().await?;
                match target {
                    MenuTarget::CatchAll(label) => info!(
                        "Clicked item '{}' because crop '{}' is listed as produce",
                        label, crop
                    ),
                    MenuTarget::Exact(_) => info!("Clicked item '{}'", crop),
                }
                return Ok(true);
            }
        }

        warn!(crop, target = %target, "No menu item matched; nothing clicked");
        Ok(false)
    }
}
