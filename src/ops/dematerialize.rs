use crate::{
  event::EventType,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// The inverse of `materialize`: turns `Event` values back into the events
/// they describe. A wrapped terminal event ends the stream.
#[derive(Clone)]
pub struct Dematerialize<S> {
  pub source: S,
}

impl<S> ObservableType for Dematerialize<S>
where
  S: ObservableType,
  S::Item: EventType,
{
  type Item = <S::Item as EventType>::Item;
  type Err = S::Err;
}

pub struct DematerializeObserver<O>(Option<O>);

impl<O, E, Err> Observer<E, Err> for DematerializeObserver<O>
where
  E: EventType<Err = Err>,
  O: Observer<E::Item, Err>,
{
  fn next(&mut self, value: E) { value.into_event().dispatch(&mut self.0); }

  fn error(self, err: Err) { self.0.error(err); }

  fn complete(self) { self.0.complete(); }

  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<S, O> CoreObservable<O> for Dematerialize<S>
where
  S: CoreObservable<DematerializeObserver<O>>,
  S::Item: EventType,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(DematerializeObserver(Some(observer)))
  }
}
