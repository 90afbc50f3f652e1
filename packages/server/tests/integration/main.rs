mod submission;
