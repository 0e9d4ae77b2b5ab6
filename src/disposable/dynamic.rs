use smallvec::SmallVec;

/// An id-keyed set of disposables.
///
/// Used where inner subscriptions come and go while the owner keeps running:
/// `flat_map` inners and subject observers. `add` hands back an id that the
/// owner later uses to `remove` a single entry, for example when that inner
/// stream completes.
///
/// ```rust
/// use rxkit::disposable::DynamicDisposables;
///
/// let mut set: DynamicDisposables<()> = DynamicDisposables::default();
/// let first = set.add(());
/// let second = set.add(());
/// assert_eq!(set.len(), 2);
/// assert!(set.remove(first).is_some());
/// assert!(set.get_mut(second).is_some());
/// assert!(set.remove(first).is_none());
/// ```
pub struct DynamicDisposables<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicDisposables<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicDisposables<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item and return its unique id.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, item));
    id
  }

  /// Remove an item by id.
  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn get_mut(&mut self, id: usize) -> Option<&mut U> {
    self
      .items
      .iter_mut()
      .find(|(i, _)| *i == id)
      .map(|(_, item)| item)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }

  /// Keep only the entries for which `f` returns true.
  #[inline]
  pub fn retain(&mut self, mut f: impl FnMut(&U) -> bool) { self.items.retain(|(_, item)| f(item)) }
}
