// Draft lottery engine: standings classification, odds, and the weighted draw.

pub mod drawer;
pub mod odds;
pub mod standings;
