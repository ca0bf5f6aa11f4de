use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::error::{RenderError, RenderResult};
use crate::picture::{BufferId, RasterBuffer};

use super::Canvas;

struct CachedTexture<T> {
    texture: T,
    // Does not keep the buffer alive; used to find entries whose buffer is gone.
    source: Weak<RasterBuffer>,
}

/// Raster buffer → backend texture map.
///
/// Invariants:
/// - at most one live texture per `BufferId`
/// - a replaced texture is destroyed as soon as its successor exists
/// - textures only leave the cache through `Canvas::destroy_texture`
///
/// The cache does not own a canvas; every mutating call takes the canvas that
/// created the textures. Using two different canvases with one cache is a
/// logic error.
pub struct TextureCache<T> {
    entries: HashMap<BufferId, CachedTexture<T>>,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: BufferId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the texture for `buffer`, building it first when there is none
    /// yet or when the buffer is dynamic.
    ///
    /// On build failure the previous texture (if any) stays cached untouched.
    /// Before a new buffer is admitted, textures of dropped buffers are purged,
    /// so the cache stays bounded by the number of live buffers.
    pub fn resolve<C>(&mut self, canvas: &mut C, buffer: &Rc<RasterBuffer>, blend: bool) -> RenderResult<&mut T>
    where
        C: Canvas<Texture = T>,
    {
        let id = buffer.id();
        if !self.entries.contains_key(&id) {
            self.purge(canvas);
        }
        match self.entries.entry(id) {
            Entry::Occupied(slot) if buffer.is_static() => Ok(&mut slot.into_mut().texture),
            Entry::Occupied(mut slot) => {
                let fresh = build(canvas, buffer, blend)?;
                let stale = std::mem::replace(&mut slot.get_mut().texture, fresh);
                canvas.destroy_texture(stale);
                log::trace!("rebuilt texture for dynamic buffer {id:?}");
                Ok(&mut slot.into_mut().texture)
            }
            Entry::Vacant(slot) => {
                let texture = build(canvas, buffer, blend)?;
                log::debug!("cached texture for buffer {id:?}");
                let entry = slot.insert(CachedTexture { texture, source: Rc::downgrade(buffer) });
                Ok(&mut entry.texture)
            }
        }
    }

    /// Destroys textures whose buffer has been dropped. Returns how many.
    pub fn purge<C>(&mut self, canvas: &mut C) -> usize
    where
        C: Canvas<Texture = T>,
    {
        let dead: Vec<BufferId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.source.strong_count() == 0)
            .map(|(&id, _)| id)
            .collect();

        for id in &dead {
            if let Some(entry) = self.entries.remove(id) {
                canvas.destroy_texture(entry.texture);
            }
        }
        if !dead.is_empty() {
            log::debug!("purged {} orphaned texture(s)", dead.len());
        }
        dead.len()
    }

    /// Destroys every cached texture.
    pub fn clear<C>(&mut self, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        for (_, entry) in self.entries.drain() {
            canvas.destroy_texture(entry.texture);
        }
    }
}

fn build<C: Canvas>(canvas: &mut C, buffer: &RasterBuffer, blend: bool) -> RenderResult<C::Texture> {
    let pixels = buffer.pixels();
    canvas
        .create_texture(&pixels, blend)
        .map_err(|source| RenderError::TextureCreation { buffer: buffer.id(), source })
}
