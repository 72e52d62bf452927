mod controller;
mod sim_time;
mod support;
mod wait_queue;
