pub mod bar;
pub mod frame;
pub mod layout;

pub use bar::{BarScale, Run, StackPlan, plan_stack, render_bar};
pub use frame::Graph;
pub use layout::{Layout, Regime};
