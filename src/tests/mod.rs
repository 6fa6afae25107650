mod test_slider;
mod test_sweeper;
mod test_validation;
