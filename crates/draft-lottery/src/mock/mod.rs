// Mock draft simulation over a finalized pick order.

pub mod simulator;
