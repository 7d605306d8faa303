use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

impl Image {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// One product's main image plus thumbnails. Picking a thumbnail swaps it
/// with the main image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    product: String,
    main: Image,
    thumbnails: Vec<Image>,
}

impl Gallery {
    pub fn new(product: impl Into<String>, main: Image, thumbnails: Vec<Image>) -> Self {
        Self {
            product: product.into(),
            main,
            thumbnails,
        }
    }

    /// Stock gallery: `./assets/<product>-01.png` as main, 02..=`count` as
    /// thumbnails.
    pub fn for_product(product: &str, label: &str, count: usize) -> Self {
        let image = |n: usize| {
            Image::new(
                format!("./assets/{product}-{n:02}.png"),
                format!("{label} - imagem {n}"),
            )
        };
        Self::new(product, image(1), (2..=count).map(image).collect())
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn main(&self) -> &Image {
        &self.main
    }

    pub fn thumbnails(&self) -> &[Image] {
        &self.thumbnails
    }

    /// Accessible name of a thumbnail button.
    pub fn thumbnail_label(&self, index: usize) -> Option<String> {
        self.thumbnails
            .get(index)
            .map(|t| format!("Ver imagem do {}: {}", self.product, t.alt))
    }

    /// Swap thumbnail `index` with the main image. False if there is no
    /// such thumbnail.
    pub fn select(&mut self, index: usize) -> bool {
        match self.thumbnails.get_mut(index) {
            Some(thumb) => {
                std::mem::swap(&mut self.main, thumb);
                true
            }
            None => {
                warn!(product = %self.product, index, "no such thumbnail");
                false
            }
        }
    }
}

/// The four galleries of the kit.
pub fn kit_galleries() -> Vec<Gallery> {
    vec![
        Gallery::for_product("headset", "Headset", 4),
        Gallery::for_product("keyboard", "Teclado", 4),
        Gallery::for_product("mouse", "Mouse", 4),
        Gallery::for_product("mousepad", "Mousepad", 3),
    ]
}
