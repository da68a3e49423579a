//! Planar images.
//!
//! A [`PlanarImage`] is an ordered list of [`Component`]s plus the reference
//! grid rectangle they cover. Component order carries meaning for the raster
//! conversions:
//!
//! | Components | Layout |
//! |------------|--------|
//! | 1 | luminance |
//! | 2 | luminance, alpha |
//! | 3 | R, G, B |
//! | 4 | R, G, B, alpha |
//!
//! The image does not require its components to be homogeneous; conversions
//! that need it call [`check_homogeneous`](crate::check_homogeneous).

use crate::{Component, ComponentParams, GridOptions, Result};

/// Color space tag attached to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Not specified.
    #[default]
    Unknown,
    /// sRGB (R, G, B[, A]).
    Srgb,
    /// Greyscale (Y[, A]).
    Gray,
}

/// Multi-component planar image.
///
/// # Example
///
/// ```rust
/// use planar_core::{ColorSpace, ComponentParams, GridOptions, PlanarImage};
///
/// let mut image = PlanarImage::from_params(
///     &[ComponentParams::unsigned8(4, 2)],
///     ColorSpace::Gray,
/// )?;
/// image.component_mut(0).unwrap().set_sample(3, 1, 200)?;
/// image.place_on_grid(&GridOptions::default().with_offset(8, 8))?;
/// assert_eq!(image.reference_grid(), (8, 8, 12, 10));
/// # Ok::<(), planar_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarImage {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    color_space: ColorSpace,
    components: Vec<Component>,
}

impl PlanarImage {
    /// Creates an image from already built components.
    ///
    /// The reference grid is set to `(0, 0, width, height)` of component 0
    /// scaled by its sub-sampling factors, or all zeros when there are no
    /// components.
    pub fn new(components: Vec<Component>, color_space: ColorSpace) -> Self {
        let (x1, y1) = components
            .first()
            .map(|c| {
                (
                    c.width().saturating_mul(c.dx()),
                    c.height().saturating_mul(c.dy()),
                )
            })
            .unwrap_or((0, 0));
        Self {
            x0: 0,
            y0: 0,
            x1,
            y1,
            color_space,
            components,
        }
    }

    /// Creates an image with zero-filled components.
    pub fn from_params(params: &[ComponentParams], color_space: ColorSpace) -> Result<Self> {
        let components = params
            .iter()
            .map(|p| Component::new(*p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(components, color_space))
    }

    /// Number of components.
    #[inline]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// All components.
    #[inline]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Component at `index`.
    #[inline]
    pub fn component(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    /// Mutable component at `index`.
    #[inline]
    pub fn component_mut(&mut self, index: usize) -> Option<&mut Component> {
        self.components.get_mut(index)
    }

    /// Consumes the image and returns its components.
    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    /// Color space tag.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Sets the color space tag.
    pub fn set_color_space(&mut self, color_space: ColorSpace) {
        self.color_space = color_space;
    }

    /// Reference grid as `(x0, y0, x1, y1)`.
    #[inline]
    pub fn reference_grid(&self) -> (u32, u32, u32, u32) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Sets the reference grid.
    pub fn set_reference_grid(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        self.x0 = x0;
        self.y0 = y0;
        self.x1 = x1;
        self.y1 = y1;
    }

    /// Derives the reference grid from component 0's size and `grid`.
    ///
    /// # Errors
    ///
    /// See [`GridOptions::extent`]. An image without components has a zero
    /// size and is rejected.
    pub fn place_on_grid(&mut self, grid: &GridOptions) -> Result<()> {
        let (width, height) = self
            .components
            .first()
            .map(|c| (c.width(), c.height()))
            .unwrap_or((0, 0));
        let (x0, y0, x1, y1) = grid.extent(width, height)?;
        self.set_reference_grid(x0, y0, x1, y1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params() {
        let params = [
            ComponentParams::unsigned8(3, 2),
            ComponentParams::unsigned8(3, 2),
            ComponentParams::unsigned8(3, 2),
        ];
        let image = PlanarImage::from_params(&params, ColorSpace::Srgb).unwrap();
        assert_eq!(image.num_components(), 3);
        assert_eq!(image.reference_grid(), (0, 0, 3, 2));
        assert_eq!(image.color_space(), ColorSpace::Srgb);
    }

    #[test]
    fn test_from_params_propagates_errors() {
        let params = [ComponentParams::new(1, 1, 40, false)];
        assert!(PlanarImage::from_params(&params, ColorSpace::Gray).is_err());
    }

    #[test]
    fn test_color_space_and_components() {
        let params = [ComponentParams::unsigned8(2, 1); 2];
        let mut image = PlanarImage::from_params(&params, ColorSpace::Unknown).unwrap();
        image.set_color_space(ColorSpace::Gray);
        assert_eq!(image.color_space(), ColorSpace::Gray);

        image.component_mut(1).unwrap().set_sample(1, 0, 9).unwrap();
        let comps = image.into_components();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[1].samples(), &[0, 9]);
    }

    #[test]
    fn test_empty_image() {
        let mut image = PlanarImage::new(Vec::new(), ColorSpace::Unknown);
        assert_eq!(image.num_components(), 0);
        assert_eq!(image.reference_grid(), (0, 0, 0, 0));
        assert!(image.component(0).is_none());
        assert!(image.place_on_grid(&GridOptions::default()).is_err());
    }

    #[test]
    fn test_subsampled_grid() {
        let params = [ComponentParams::unsigned8(4, 4).with_subsampling(2, 2)];
        let mut image = PlanarImage::from_params(&params, ColorSpace::Gray).unwrap();
        assert_eq!(image.reference_grid(), (0, 0, 8, 8));
        image
            .place_on_grid(&GridOptions::default().with_subsampling(2, 2))
            .unwrap();
        assert_eq!(image.reference_grid(), (0, 0, 7, 7));
    }
}
