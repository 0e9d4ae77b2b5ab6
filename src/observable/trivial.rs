use std::{convert::Infallible, marker::PhantomData};

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// ```
/// use rxkit::prelude::*;
///
/// observable::empty::<i32>().subscribe(|v| println!("{},", v));
///
/// // Result: nothing printed
/// ```
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty(PhantomData) }
}

impl<Item> ObservableType for Empty<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item, O> CoreObservable<O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete(); }
}

/// Creates an observable that never emits anything, not even a terminal
/// event. The subscription stays open until it is disposed.
pub fn never<Item>() -> Never<Item> { Never(PhantomData) }

pub struct Never<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { Never(PhantomData) }
}

impl<Item> ObservableType for Never<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item, O> CoreObservable<O> for Never<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, _observer: O) -> Self::Unsub {}
}

/// Creates an observable that emits no items, just terminates with an error.
pub fn throw_err<Item, Err>(e: Err) -> ThrowErr<Item, Err> { ThrowErr(e, PhantomData) }

pub struct ThrowErr<Item, Err>(Err, PhantomData<fn() -> Item>);

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { ThrowErr(self.0.clone(), PhantomData) }
}

impl<Item, Err> ObservableType for ThrowErr<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> CoreObservable<O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.0); }
}
