//! Dense 2D raster used for masks and density layers.

/// Dense `width × height` grid indexed `(x, y)`, stored with `y` contiguous.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Grid filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, data: vec![value; width * height] }
    }

    /// Grid sized to a pixel rectangle; negative sizes give an empty grid.
    pub fn for_rect(rect: crate::math::RectInt) -> Self {
        Self::new(rect.width().max(0) as usize, rect.height().max(0) as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[x * self.height + y]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[x * self.height + y] = value;
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        &mut self.data[x * self.height + y]
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Raw values, `y`-contiguous.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// New grid of the same shape with `f` applied to every cell.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|v| f(*v)).collect(),
        }
    }
}

impl Grid<f32> {
    /// True when every cell is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }
}

impl Grid<i32> {
    /// Sum of all cells.
    pub fn total(&self) -> i64 {
        self.data.iter().map(|v| *v as i64).sum()
    }
}
