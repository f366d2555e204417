mod hand;

pub use hand::{Gesture, GestureInterpreter, HandSignal, HandSignalSource};
