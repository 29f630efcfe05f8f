mod dispatch_test;
mod lifecycle_test;
mod population_test;
mod router_test;
