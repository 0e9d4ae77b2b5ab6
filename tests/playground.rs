//! End-to-end scenarios for the operator set: creation, filtering,
//! transforming, subjects and `Single`, driven through the public API only.

use std::{
  cell::{Cell, RefCell},
  convert::Infallible,
  rc::Rc,
};

use rxkit::prelude::*;

type Log<T> = Rc<RefCell<Vec<T>>>;

fn log<T>() -> Log<T> { Rc::new(RefCell::new(Vec::new())) }

// ==================== Creation ====================

#[rxkit_macro::test]
fn from_emits_in_order_then_completes() {
  let events = log();
  let c_events = events.clone();
  observable::from_iter(vec![1, 2, 3]).subscribe_event(move |e| c_events.borrow_mut().push(e));

  assert_eq!(
    *events.borrow(),
    vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Completed]
  );
}

#[rxkit_macro::test]
fn range_feeds_fibonacci() {
  let fib = log();
  let c_fib = fib.clone();
  observable::range(1, 10).subscribe(move |i| {
    let n = i as i32;
    let value = ((1.61803_f64.powi(n) - (-0.61803_f64).powi(n)) / 2.23606).round() as i64;
    c_fib.borrow_mut().push(value);
  });

  assert_eq!(*fib.borrow(), vec![1, 1, 2, 3, 5, 8, 13, 21, 34, 55]);
}

#[rxkit_macro::test]
fn never_stays_open_until_disposed() {
  let disposed = Rc::new(Cell::new(false));
  let c_disposed = disposed.clone();
  let subscription = observable::never::<()>()
    .on_disposed(move || c_disposed.set(true))
    .subscribe_all(|_| panic!("never emits"), |e| match e {}, || panic!("never completes"));

  assert!(!subscription.is_closed());
  subscription.dispose();
  assert!(disposed.get());
}

#[rxkit_macro::test]
fn create_with_dispose_bag() {
  let events = log();
  {
    let bag = DisposeBag::new();
    let (c_next, c_disposed) = (events.clone(), events.clone());
    observable::create(|emitter: &mut dyn Emitter<&'static str, &'static str>| {
      emitter.next("1");
      emitter.next("?");
    })
    .on_disposed(move || c_disposed.borrow_mut().push("Disposed".to_owned()))
    .subscribe(move |v| c_next.borrow_mut().push(v.to_owned()))
    .disposed_by(&bag);

    assert_eq!(*events.borrow(), vec!["1", "?"]);
  }
  assert_eq!(*events.borrow(), vec!["1", "?", "Disposed"]);
}

#[rxkit_macro::test]
fn create_suppresses_events_after_terminal() {
  let events = log();
  let c_events = events.clone();
  observable::create(|emitter: &mut dyn Emitter<&'static str, &'static str>| {
    emitter.next("1");
    emitter.error("anError");
    emitter.complete();
    emitter.next("?");
  })
  .subscribe_event(move |e| c_events.borrow_mut().push(e));

  assert_eq!(*events.borrow(), vec![Event::Next("1"), Event::Error("anError")]);
}

#[rxkit_macro::test]
fn deferred_alternates_between_sources() {
  let runs = log();
  let flip = Rc::new(Cell::new(false));
  let bag = DisposeBag::new();
  let factory = observable::defer(move || {
    flip.set(!flip.get());
    if flip.get() { of![1, 2, 3] } else { of![4, 5, 6] }
  });

  for _ in 0..4 {
    let line = Rc::new(RefCell::new(String::new()));
    let c_line = line.clone();
    factory
      .clone()
      .subscribe(move |v| c_line.borrow_mut().push_str(&v.to_string()))
      .disposed_by(&bag);
    runs.borrow_mut().push(line.borrow().clone());
  }

  assert_eq!(*runs.borrow(), vec!["123", "456", "123", "456"]);
}

#[derive(Debug, Clone, PartialEq)]
enum FileReadError {
  FileNotFound,
}

#[rxkit_macro::test]
fn single_load_text() {
  let files = [("Copyright", "Copyright (c) rxkit contributors")];
  let load_text = move |name: &'static str| {
    Single::create(move |emitter: &mut dyn SingleEmitter<String, FileReadError>| {
      match files.iter().find(|(file, _)| *file == name) {
        Some((_, contents)) => emitter.success((*contents).to_owned()),
        None => emitter.error(FileReadError::FileNotFound),
      }
    })
  };

  let outcomes = log();
  let bag = DisposeBag::new();
  for name in ["Copyright", "Copyright2"] {
    let c_outcomes = outcomes.clone();
    load_text(name)
      .subscribe_event(move |e| c_outcomes.borrow_mut().push(e))
      .disposed_by(&bag);
  }

  assert_eq!(
    *outcomes.borrow(),
    vec![
      SingleEvent::Success("Copyright (c) rxkit contributors".to_owned()),
      SingleEvent::Failure(FileReadError::FileNotFound),
    ]
  );
}

// ==================== Filtering ====================

#[rxkit_macro::test]
fn ignore_elements_reports_only_completion() {
  let outs = Rc::new(Cell::new(0));
  let c_outs = outs.clone();
  let strikes = PublishSubject::<&'static str, Infallible>::new();
  strikes
    .clone()
    .ignore_elements()
    .subscribe_all(|_| {}, |e| match e {}, move || c_outs.set(c_outs.get() + 1));

  strikes.on_next("X");
  strikes.on_next("X");
  strikes.on_next("X");
  assert_eq!(outs.get(), 0);
  strikes.on_completed();
  assert_eq!(outs.get(), 1);
}

#[rxkit_macro::test]
fn element_at_third_strike() {
  let events = log();
  let c_events = events.clone();
  let strikes = PublishSubject::<&'static str, Infallible>::new();
  strikes
    .clone()
    .element_at(2)
    .subscribe_event(move |e| c_events.borrow_mut().push(e));

  strikes.on_next("X");
  strikes.on_next("X");
  assert!(events.borrow().is_empty());
  strikes.on_next("X");
  assert_eq!(*events.borrow(), vec![Event::Next("X"), Event::Completed]);
  assert_eq!(strikes.observer_count(), 0);
}

#[rxkit_macro::test]
fn filter_even() {
  let events = log();
  let c_events = events.clone();
  of![1, 2, 3, 4, 5, 6]
    .filter(|v| v % 2 == 0)
    .subscribe_event(move |e| c_events.borrow_mut().push(e));

  assert_eq!(
    *events.borrow(),
    vec![Event::Next(2), Event::Next(4), Event::Next(6), Event::Completed]
  );
}

#[rxkit_macro::test]
fn skip_and_skip_while() {
  let skipped = log();
  let c_skipped = skipped.clone();
  of!["A", "B", "C", "D", "E", "F"]
    .skip(3)
    .subscribe(move |v| c_skipped.borrow_mut().push(v));
  assert_eq!(*skipped.borrow(), vec!["D", "E", "F"]);

  let kept = log();
  let c_kept = kept.clone();
  of![2, 2, 3, 4, 4]
    .skip_while(|v| v % 2 == 0)
    .subscribe(move |v| c_kept.borrow_mut().push(v));
  assert_eq!(*kept.borrow(), vec![3, 4, 4]);
}

#[rxkit_macro::test]
fn skip_until_trigger() {
  let seen = log();
  let c_seen = seen.clone();
  let subject = PublishSubject::<&'static str, Infallible>::new();
  let trigger = PublishSubject::<&'static str, Infallible>::new();
  subject
    .clone()
    .skip_until(trigger.clone())
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  subject.on_next("A");
  subject.on_next("B");
  trigger.on_next("X");
  subject.on_next("C");

  assert_eq!(*seen.borrow(), vec!["C"]);
  assert_eq!(trigger.observer_count(), 0);
}

#[rxkit_macro::test]
fn take_variants() {
  let taken = log();
  let c_taken = taken.clone();
  of![1, 2, 3, 4, 5, 6]
    .take(3)
    .subscribe(move |v| c_taken.borrow_mut().push(v));
  assert_eq!(*taken.borrow(), vec![1, 2, 3]);

  let indexed = log();
  let c_indexed = indexed.clone();
  of![2, 2, 4, 4, 6, 6]
    .enumerate()
    .take_while(|(index, v)| v % 2 == 0 && *index < 3)
    .map(|(_, v)| v)
    .subscribe(move |v| c_indexed.borrow_mut().push(v));
  assert_eq!(*indexed.borrow(), vec![2, 2, 4]);

  let until = log();
  let c_until = until.clone();
  of![1, 2, 3, 4, 5]
    .take_until_with(TakeUntilBehavior::Exclusive, |v| v % 4 == 0)
    .subscribe(move |v| c_until.borrow_mut().push(v));
  assert_eq!(*until.borrow(), vec![1, 2, 3]);
}

#[rxkit_macro::test]
fn take_until_trigger() {
  let seen = log();
  let c_seen = seen.clone();
  let subject = PublishSubject::<&'static str, Infallible>::new();
  let trigger = PublishSubject::<&'static str, Infallible>::new();
  subject
    .clone()
    .take_until(trigger.clone())
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  subject.on_next("1");
  subject.on_next("2");
  trigger.on_next("X");
  subject.on_next("3");

  assert_eq!(*seen.borrow(), vec!["1", "2"]);
  assert_eq!(subject.observer_count(), 0);
  assert_eq!(trigger.observer_count(), 0);
}

#[rxkit_macro::test]
fn distinct_until_changed_variants() {
  let letters = log();
  let c_letters = letters.clone();
  of!["A", "A", "B", "B", "A"]
    .distinct_until_changed()
    .subscribe(move |v| c_letters.borrow_mut().push(v));
  assert_eq!(*letters.borrow(), vec!["A", "B", "A"]);

  // Numbers spelled out share a word: "ten" / "one hundred ten" / "twenty" ...
  fn words(n: u32) -> Vec<&'static str> {
    match n {
      10 => vec!["ten"],
      110 => vec!["one", "hundred", "ten"],
      20 => vec!["twenty"],
      200 => vec!["two", "hundred"],
      210 => vec!["two", "hundred", "ten"],
      310 => vec!["three", "hundred", "ten"],
      _ => vec![],
    }
  }
  let numbers = log();
  let c_numbers = numbers.clone();
  of![10, 110, 20, 200, 210, 310]
    .distinct_until_changed_by(|a, b| words(*a).iter().any(|w| words(*b).contains(w)))
    .subscribe(move |v| c_numbers.borrow_mut().push(v));
  assert_eq!(*numbers.borrow(), vec![10, 20, 200]);
}

// ==================== Transforming ====================

#[rxkit_macro::test]
fn to_array_and_enumerate() {
  let arrays = log();
  let c_arrays = arrays.clone();
  of!["A", "B", "C"]
    .to_array()
    .subscribe(move |v| c_arrays.borrow_mut().push(v), |e| match e {});
  assert_eq!(*arrays.borrow(), vec![vec!["A", "B", "C"]]);

  let doubled = log();
  let c_doubled = doubled.clone();
  of![1, 2, 3, 4, 5, 6]
    .enumerate()
    .map(|(index, v)| if index > 2 { v * 2 } else { v })
    .subscribe(move |v| c_doubled.borrow_mut().push(v));
  assert_eq!(*doubled.borrow(), vec![1, 2, 3, 8, 10, 12]);
}

#[rxkit_macro::test]
fn compact_map_then_join() {
  let sentence = log();
  let c_sentence = sentence.clone();
  of![Some("To"), Some("be"), None, Some("or"), Some("not"), Some("to"), Some("be"), None]
    .filter_map(|word| word)
    .to_array()
    .map(|words| words.join(" "))
    .subscribe(move |v| c_sentence.borrow_mut().push(v), |e| match e {});

  assert_eq!(*sentence.borrow(), vec!["To be or not to be"]);
}

#[derive(Clone)]
struct Student {
  score: BehaviorSubject<i32, Infallible>,
}

fn scores_with<F>(latest_only: bool, drive: F) -> Vec<i32>
where
  F: FnOnce(&PublishSubject<Student, Infallible>, &Student, &Student),
{
  let scores = log();
  let c_scores = scores.clone();
  let bag = DisposeBag::new();
  let laura = Student { score: BehaviorSubject::new(80) };
  let charlotte = Student { score: BehaviorSubject::new(90) };
  let student = PublishSubject::<Student, Infallible>::new();

  if latest_only {
    student
      .clone()
      .flat_map_latest(|s| s.score.clone())
      .subscribe(move |v| c_scores.borrow_mut().push(v))
      .disposed_by(&bag);
  } else {
    student
      .clone()
      .flat_map(|s| s.score.clone())
      .subscribe(move |v| c_scores.borrow_mut().push(v))
      .disposed_by(&bag);
  }

  drive(&student, &laura, &charlotte);
  let result = scores.borrow().clone();
  result
}

fn classroom(student: &PublishSubject<Student, Infallible>, laura: &Student, charlotte: &Student) {
  student.on_next(laura.clone());
  laura.score.on_next(85);
  student.on_next(charlotte.clone());
  laura.score.on_next(95);
  charlotte.score.on_next(100);
}

#[rxkit_macro::test]
fn flat_map_follows_every_student() {
  assert_eq!(scores_with(false, classroom), vec![80, 85, 90, 95, 100]);
}

#[rxkit_macro::test]
fn flat_map_latest_follows_newest_student() {
  assert_eq!(scores_with(true, classroom), vec![80, 85, 90, 100]);
}

#[derive(Debug, Clone, PartialEq)]
enum MyError {
  AnError,
}

#[derive(Clone)]
struct FallibleStudent {
  score: BehaviorSubject<i32, MyError>,
}

#[rxkit_macro::test]
fn materialize_and_dematerialize_survive_inner_errors() {
  let scores = log();
  let errors = log();
  let (c_scores, c_errors) = (scores.clone(), errors.clone());
  let bag = DisposeBag::new();

  let laura = FallibleStudent { score: BehaviorSubject::new(80) };
  let charlotte = FallibleStudent { score: BehaviorSubject::new(100) };
  let student = BehaviorSubject::<FallibleStudent, MyError>::new(laura.clone());

  student
    .clone()
    .flat_map_latest(|s| s.score.clone().materialize())
    .filter(move |event| match event.error() {
      Some(err) => {
        c_errors.borrow_mut().push(err.clone());
        false
      }
      None => true,
    })
    .dematerialize()
    .subscribe(move |v| c_scores.borrow_mut().push(v))
    .disposed_by(&bag);

  laura.score.on_next(85);
  laura.score.on_error(MyError::AnError);
  laura.score.on_next(90);
  student.on_next(charlotte);

  assert_eq!(*scores.borrow(), vec![80, 85, 100]);
  assert_eq!(*errors.borrow(), vec![MyError::AnError]);
}

#[rxkit_macro::test]
fn materialize_dematerialize_is_identity() {
  let direct = log();
  let round_trip = log();
  let (c_direct, c_round_trip) = (direct.clone(), round_trip.clone());
  let source = observable::create(|emitter: &mut dyn Emitter<i32, &'static str>| {
    emitter.next(1);
    emitter.next(2);
    emitter.error("boom");
  });

  source
    .clone()
    .subscribe_event(move |e| c_direct.borrow_mut().push(e));
  source
    .materialize()
    .dematerialize()
    .subscribe_event(move |e| c_round_trip.borrow_mut().push(e));

  assert_eq!(*direct.borrow(), *round_trip.borrow());
}

// ==================== Disposal ====================

#[rxkit_macro::test]
fn double_dispose_is_a_no_op() {
  let releases = Rc::new(Cell::new(0));
  let c_releases = releases.clone();
  let subject = PublishSubject::<i32, Infallible>::new();
  let subscription = subject
    .clone()
    .on_disposed(move || c_releases.set(c_releases.get() + 1))
    .subscribe(|_| {});

  subscription.unsubscribe();
  subscription.unsubscribe();
  subscription.dispose();
  assert_eq!(releases.get(), 1);
  assert_eq!(subject.observer_count(), 0);
}

#[rxkit_macro::test]
fn disposed_bag_disposes_late_inserts() {
  let bag = DisposeBag::new();
  bag.dispose();
  let subject = PublishSubject::<i32, Infallible>::new();
  subject.clone().subscribe(|_| {}).disposed_by(&bag);
  assert_eq!(subject.observer_count(), 0);
  assert!(bag.is_empty());
}
