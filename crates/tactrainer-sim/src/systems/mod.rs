pub mod datalink;
pub mod fire_control;
pub mod intercept;
pub mod kinematics;
pub mod missile_kinematics;
pub mod navigation;
pub mod sensors;
pub mod snapshot;
